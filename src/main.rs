use refmap::ui::output;

fn main() {
    if let Err(err) = refmap::cli::run() {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
