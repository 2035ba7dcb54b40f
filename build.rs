use std::env;
use std::fs;
use std::path::Path;

// Loads LDS_* settings from .env into compile-time env vars read by src/config.rs.
// Variables already set in the environment win over the file.
fn main() {
    let env_file = Path::new(".env");

    if let Ok(contents) = fs::read_to_string(env_file) {
        println!("cargo:rerun-if-changed=.env");

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if key.starts_with("LDS_") && env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else if env::var("LDS_USUARIO").is_err() {
        println!("cargo:warning=No .env file and no LDS_USUARIO set: lookups will fail with an auth error. Copy .env.example to .env.");
    }

    for key in [
        "LDS_TOKEN_URL",
        "LDS_PARAMETROS_URL",
        "LDS_USUARIO",
        "LDS_PASSWORD",
        "LDS_REAUTH",
        "LDS_FALLBACK",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
