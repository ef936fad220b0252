use funding_report::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        if !err.is_reported() {
            eprintln!("Error: {err}");
        }
        std::process::exit(1);
    }
}
