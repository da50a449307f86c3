use env_logger::{Builder, Env, Target};

/// Log to stderr so report output on stdout stays clean. `RUST_LOG`
/// overrides the default filter.
pub fn init() {
    let env = Env::default().default_filter_or("tog_core=info,tog_cli=info,warn");
    Builder::from_env(env).target(Target::Stderr).init();
}
