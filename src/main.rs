use std::process::ExitCode;

use tracing::{error, info};

use morsel::{
    config::Settings, controller::ScreenController, io::sys, render::RenderContext, runner::Runner,
    words::HttpFetcher, Result,
};

/// Everything up to (but not including) taking over the terminal.
fn prepare() -> Result<(Settings, ScreenController<HttpFetcher>)> {
    let settings = Settings::load()?;
    settings.validate()?;
    morsel::logging::init(&settings.log)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let fetcher = HttpFetcher::new(
        settings.words.url.clone(),
        settings.words.timeout(),
        settings.words.max_retry(),
    )?;
    let controller = ScreenController::new(settings.game_settings(), fetcher)?;
    Ok((settings, controller))
}

fn main() -> ExitCode {
    let (settings, controller) = match prepare() {
        Ok(res) => res,
        Err(e) => {
            eprintln!("morsel: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let iosys = match sys::load() {
        Ok(iosys) => iosys,
        Err(errors) => {
            let reasons: Vec<_> = errors.iter().map(|(name, e)| format!("{}: {}", name, e)).collect();
            error!("no usable display: {}", reasons.join(", "));
            eprintln!("morsel: no usable display ({})", reasons.join(", "));
            return ExitCode::FAILURE;
        }
    };
    let ctx = match RenderContext::new(iosys, &settings.caption) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("failed to set up the display: {}", e);
            eprintln!("morsel: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match Runner::new(controller, ctx, settings.fps).run() {
        Ok(_) => {
            info!("bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("game crashed: {}", e);
            eprintln!("morsel: {}", e);
            ExitCode::FAILURE
        }
    }
}
