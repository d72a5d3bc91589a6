use std::env;
use std::fs;
use std::path::Path;

// Claves que PanelConfig::from_env lee con option_env!
const CONFIG_KEYS: &[&str] = &[
    "SOLANA_RPC_URL",
    "NETWORK_LABEL",
    "ENABLE_LOGGING",
    "COOLDOWN_SECONDS",
    "COOLDOWN_TICK_MS",
    "ACCRUAL_INTERVAL_MS",
    "ACCRUAL_QUANTUM",
    "SETTLEMENT_LATENCY_MS",
    "INITIAL_STAKE_INPUT",
    "INITIAL_PENDING_REWARD",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Variables del .env local; las del entorno tienen prioridad
    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(e) => {
            println!("cargo:warning=No se pudo leer .env: {}", e);
            return;
        }
    };

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if !CONFIG_KEYS.contains(&key) {
            println!("cargo:warning=Clave desconocida en .env: {}", key);
            continue;
        }
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value.trim().trim_matches('"'));
        }
    }
}
