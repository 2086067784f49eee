use std::time::{Duration, Instant};

use log::{info, trace};

use crate::config::{POLL_TIMEOUT_MS, QUIT_KEY, WINDOW_NAME};
use crate::depth::{DepthRuntime, InferenceEngine, ModelConfig, draw_fps, postprocess, preprocess};
use crate::device::{Camera, Display};
use crate::error::Result;

/// 单帧计时结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// 预处理加推理的耗时（秒）
    pub elapsed_seconds: f64,
    /// 由耗时换算的帧率，向零取整
    pub fps: u32,
}

impl FrameMetrics {
    /// 由单帧耗时计算帧率；耗时为 0 时帧率记为 0
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let elapsed_seconds = elapsed.as_secs_f64();
        let fps = if elapsed_seconds > 0.0 {
            (1.0 / elapsed_seconds) as u32
        } else {
            0
        };
        Self {
            elapsed_seconds,
            fps,
        }
    }
}

/// 采集循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 设备已获取，尚未开始处理
    Opening,
    Running,
    /// 设备已释放，窗口已关闭
    Closed,
}

/// 每次迭代后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    /// 用户按下退出键
    StopRequested,
    /// 设备关闭或读到空帧
    StreamEnded,
}

/// 一次运行的汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub frames: u64,
    pub exit: LoopSignal,
}

/// 采集循环
///
/// 单线程顺序执行：读帧 → 预处理 → 推理 → 后处理 → 叠加 FPS → 显示 → 检查退出。
/// 相机与窗口由循环独占，在进入 `Closed` 时释放且只释放一次；
/// 即使某次迭代出错也会先释放资源再把错误返回给调用方。
pub struct CaptureLoop<C: Camera, D: Display, R: DepthRuntime> {
    camera: C,
    display: D,
    engine: InferenceEngine<R>,
    config: ModelConfig,
    state: LoopState,
    frames: u64,
    last_metrics: Option<FrameMetrics>,
}

impl<C: Camera, D: Display, R: DepthRuntime> CaptureLoop<C, D, R> {
    pub fn new(camera: C, display: D, engine: InferenceEngine<R>, config: ModelConfig) -> Self {
        Self {
            camera,
            display,
            engine,
            config,
            state: LoopState::Opening,
            frames: 0,
            last_metrics: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// 已完整处理并显示的帧数
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_metrics(&self) -> Option<FrameMetrics> {
        self.last_metrics
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn engine(&self) -> &InferenceEngine<R> {
        &self.engine
    }

    /// 运行直到视频流结束或用户请求退出
    ///
    /// # 错误处理
    /// 帧处理过程中的任何错误都不会重试：资源释放后直接返回Err
    pub fn run(&mut self) -> Result<LoopReport> {
        if self.state == LoopState::Closed {
            return Ok(LoopReport {
                frames: self.frames,
                exit: LoopSignal::StreamEnded,
            });
        }
        self.state = LoopState::Running;
        let result = self.drive();
        self.close();
        result
    }

    fn drive(&mut self) -> Result<LoopReport> {
        loop {
            let signal = self.step()?;
            if signal != LoopSignal::Continue {
                return Ok(LoopReport {
                    frames: self.frames,
                    exit: signal,
                });
            }
        }
    }

    /// 执行一次迭代
    pub fn step(&mut self) -> Result<LoopSignal> {
        if !self.camera.is_open() {
            info!("相机已关闭，结束采集");
            return Ok(LoopSignal::StreamEnded);
        }

        let frame = self.camera.read_frame()?;
        if frame.is_empty() {
            info!("图像不可用，视频流结束");
            return Ok(LoopSignal::StreamEnded);
        }

        let start = Instant::now();
        let tensor = preprocess(&frame, &self.config)?;
        let raw = self.engine.forward(&tensor)?;
        let metrics = FrameMetrics::from_elapsed(start.elapsed());
        trace!(
            "第 {} 帧推理耗时 {:.4}s ({} FPS)",
            self.frames + 1,
            metrics.elapsed_seconds,
            metrics.fps
        );

        let depth_image = postprocess(&raw, frame.dimensions())?;
        let depth_image = draw_fps(&depth_image, metrics.fps);
        self.display.show(WINDOW_NAME, &depth_image)?;

        self.frames += 1;
        self.last_metrics = Some(metrics);

        match self.display.poll_key(POLL_TIMEOUT_MS)? {
            Some(key) if key == QUIT_KEY => {
                info!("收到退出按键");
                Ok(LoopSignal::StopRequested)
            }
            _ => Ok(LoopSignal::Continue),
        }
    }

    /// 释放相机并关闭窗口，重复调用无副作用
    pub fn close(&mut self) {
        if self.state == LoopState::Closed {
            return;
        }
        self.camera.close();
        self.display.destroy_all_windows();
        self.state = LoopState::Closed;
        info!("资源已释放，共处理 {} 帧", self.frames);
    }
}

impl<C: Camera, D: Display, R: DepthRuntime> Drop for CaptureLoop<C, D, R> {
    fn drop(&mut self) {
        self.close();
    }
}
