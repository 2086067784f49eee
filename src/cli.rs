use clap::Parser;

use crate::config::{CONTINUITY_CAMERA_INDEX, DEFAULT_CAMERA_INDEX};
use crate::depth::ModelConfig;

/// 实时单目深度估计
#[derive(Debug, Clone, Parser)]
#[command(name = "depthcam", version, about = "MiDaS 实时单目深度估计")]
pub struct Args {
    /// 使用小模型 (MiDaS v2.1 Small, 256x256)，否则使用大模型 (384x384)
    #[arg(long)]
    pub small: bool,

    /// 使用连续互通相机（设备索引 1）代替默认相机
    #[arg(long)]
    pub continuity: bool,
}

impl Args {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::select(self.small)
    }

    pub fn camera_index(&self) -> i32 {
        if self.continuity {
            CONTINUITY_CAMERA_INDEX
        } else {
            DEFAULT_CAMERA_INDEX
        }
    }
}
