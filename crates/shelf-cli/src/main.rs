#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = shelf_cli::run_from_env() {
        tracing::error!(target: "shelf.cli", %error, exit_code = error.exit_code(), "command failed");
        eprintln!("shelf: {error}");
        std::process::exit(error.exit_code());
    }
}
