use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use depthcam::cli::Args;
use depthcam::device::{HighGuiDisplay, OpenCvCamera};
use depthcam::{CaptureLoop, EngineOptions, InferenceEngine, OrtRuntime, load_model};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.model_config();
    info!("模型: {:?} ({})", config.variant, config.model_path().display());

    let session = load_model(config.model_path(), &EngineOptions::default())
        .context("模型加载失败")?;
    let engine = InferenceEngine::new(OrtRuntime::new(session)?);

    let camera = OpenCvCamera::open(args.camera_index())
        .with_context(|| format!("无法打开相机 {}", args.camera_index()))?;
    let mut capture = CaptureLoop::new(camera, HighGuiDisplay::new(), engine, config);

    match capture.run() {
        Ok(report) => {
            info!("退出: {:?}，共处理 {} 帧", report.exit, report.frames);
            Ok(())
        }
        Err(e) => {
            error!("帧处理失败: {}", e);
            Err(e.into())
        }
    }
}
