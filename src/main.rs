//! corral binary entry point.

fn main() {
    if let Err(err) = corral::cli::run() {
        corral::ui::output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
