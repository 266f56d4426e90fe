use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::info;
use std::process::ExitCode;
use video_contact_sheet::cli::Cli;
use video_contact_sheet::component::ContactSheetGenerator;
use video_contact_sheet::config::Settings;
use video_contact_sheet::init;
use video_contact_sheet::signal::setup_shutdown_signal;
use video_contact_sheet::tools::{FfmpegProcessor, SvgTextRenderer};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init::init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::FAILURE
        }
    }
}

/// 回傳是否所有影片都處理成功
fn run(cli: &Cli) -> Result<bool> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply_to(&mut settings);
    settings.validate().context("設定值無效")?;

    let shutdown_signal = setup_shutdown_signal()?;

    // 字型在處理任何影片前就先確認
    let renderer = SvgTextRenderer::from_system_fonts(&settings.sheet.font_family)
        .with_context(|| format!("無法載入字型: {}", settings.sheet.font_family))?;
    let processor = FfmpegProcessor::new(&settings.ffmpeg_path, &settings.ffprobe_path);

    let generator = ContactSheetGenerator::new(settings, processor, renderer, shutdown_signal);
    let result = generator.run(&cli.inputs)?;

    info!("程式結束");
    Ok(!result.has_failures() && !result.interrupted)
}
