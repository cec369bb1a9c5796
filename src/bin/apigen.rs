use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = apigen::logging::init_logging() {
        eprintln!("Warning: {err:#}");
    }
    match apigen::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
