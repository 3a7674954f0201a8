use uasset2json::convert::{convert, Invocation};
use uasset2json::engine;
use uasset2json::uasset::UassetBackend;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(request) = Invocation::from_args(&args) else {
        eprintln!("Usage:");
        eprintln!("  uasset2json <engine_version> <input_uasset_path> <output_json_path> [usmap_path]");
        eprintln!();
        eprintln!("Example engine versions: {}", engine::example_tags().join(", "));
        std::process::exit(1);
    };

    match convert(&UassetBackend, &request) {
        Ok(outcome) => {
            if outcome.mapping_loaded {
                if let Some(mapping) = &request.mapping_path {
                    eprintln!("Loaded mappings: {}", mapping.display());
                }
            }
            let input_name = request
                .input_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| request.input_path.display().to_string());
            println!("Successfully converted: {}", input_name);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            if err.version_hint() {
                eprintln!(
                    "This often means the engine version is wrong or a required .usmap file is missing."
                );
            }
            std::process::exit(1);
        }
    }
}
