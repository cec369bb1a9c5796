//! Generates the routing and validation layer from `api.yaml`.

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    apigen::build::generate_to_out_dir("api.yaml", "api_gen.rs")?;
    Ok(())
}
