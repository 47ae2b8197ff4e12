fn main() {
    println!("cargo:rerun-if-env-changed=FALLGUARD_CONFIG_JSON");

    // Host builds (unit/integration tests) have no ESP-IDF sysenv to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
