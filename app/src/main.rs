mod cli;
mod global_settings;

fn main() {
    miette::set_panic_hook();
    env_logger::init();

    let settings = global_settings::GlobalSettings::from_env();

    match cli::exec(&settings) {
        Ok(success) => {
            if !success {
                std::process::exit(1);
            }
        }
        Err(err) => {
            let report = miette::Report::new(err);
            let mut stderr = std::io::stderr().lock();
            uwu_driver::render_reports_io(
                &mut stderr,
                &[&report],
                settings.colorize == global_settings::ColorChoice::Always,
            );
            std::process::exit(1);
        }
    }
}
