use gl_sandbox::{
    app,
    config::{Config, InputArguments},
    logging,
};

fn main() {
    let args = InputArguments::read_cli();

    let config = match Config::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            logging::init(None);
            log::error!("{}", err);
            std::process::exit(-1);
        }
    };

    logging::init(config.log_filter.as_deref());
    log::debug!("{:?}", config);

    if let Err(err) = app::run(&config) {
        log::error!("{}", err);
        std::process::exit(-1);
    }
}
