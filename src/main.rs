// Entry point: renders headless figures or launches the egui/eframe dashboard.
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::anyhow;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

use teendepviz::app::App;
use teendepviz::cli::Args;
use teendepviz::config::AppConfig;
use teendepviz::headless;
use teendepviz::ui::viewdata::DataSources;
use teendepviz::ui::windows::PAGE_TITLE;
use teendepviz::view::ViewOption;

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config);

    let sources = DataSources {
        uk_csv: args.uk_csv.clone().unwrap_or(config.data.uk_csv.clone()),
        us_csv: args.us_csv.clone().unwrap_or(config.data.us_csv.clone()),
    };
    let initial = args.view.unwrap_or(config.view.default);

    if args.nogui {
        let views: Vec<ViewOption> = if args.all_views {
            ViewOption::ALL.to_vec()
        } else {
            vec![initial]
        };
        let out_dir = args.out_dir.clone().unwrap_or(config.render.out_dir.clone());
        let (_, table) = headless::run(
            &views,
            &sources,
            Path::new(&out_dir),
            &args.format,
            (config.render.width, config.render.height),
        )?;
        println!("Underlying Data (UK)\n{table}");
        return Ok(());
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        error!("Error setting Ctrl-C handler: {err}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(PAGE_TITLE)
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    let pixels_per_point = config.window.pixels_per_point;
    eframe::run_native(
        PAGE_TITLE,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(App::new(
                cc,
                sources,
                initial,
                pixels_per_point,
                stop_flag,
            )))
        }),
    )
    .map_err(|err| anyhow!("eframe: {err}"))
}
