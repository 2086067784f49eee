#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use depthcam::{Camera, DepthError, DepthRuntime, DepthTensor, Display, Frame};
use image::RgbImage;
use ndarray::Array4;

/// 按脚本依次返回帧的模拟相机
pub struct ScriptedCamera {
    frames: VecDeque<Frame>,
    pub reads: usize,
    pub close_calls: usize,
    pub open: bool,
}

impl ScriptedCamera {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            reads: 0,
            close_calls: 0,
            open: true,
        }
    }

    /// `count` 帧有效图像之后返回空帧
    pub fn with_frames_then_empty(count: usize, width: u32, height: u32) -> Self {
        let mut frames: Vec<Frame> = (0..count)
            .map(|_| Frame::filled(width, height, [128, 128, 128]))
            .collect();
        frames.push(Frame::empty());
        Self::new(frames)
    }
}

impl Camera for ScriptedCamera {
    fn is_open(&self) -> bool {
        self.open
    }

    fn read_frame(&mut self) -> Result<Frame, DepthError> {
        self.reads += 1;
        Ok(self.frames.pop_front().unwrap_or_else(Frame::empty))
    }

    fn close(&mut self) {
        self.close_calls += 1;
        self.open = false;
    }
}

/// 记录显示内容并按脚本返回按键的模拟窗口
#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<(String, RgbImage)>,
    pub keys: VecDeque<Option<char>>,
    pub destroy_calls: usize,
}

impl RecordingDisplay {
    pub fn with_keys(keys: Vec<Option<char>>) -> Self {
        Self {
            keys: keys.into(),
            ..Self::default()
        }
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, window: &str, image: &RgbImage) -> Result<(), DepthError> {
        self.shown.push((window.to_string(), image.clone()));
        Ok(())
    }

    fn poll_key(&mut self, _timeout_ms: i32) -> Result<Option<char>, DepthError> {
        Ok(self.keys.pop_front().flatten())
    }

    fn destroy_all_windows(&mut self) {
        self.destroy_calls += 1;
    }
}

/// 返回常数深度图并统计调用次数的模拟运行时
pub struct EchoRuntime {
    pub value: f32,
    pub outputs: Vec<String>,
    pub name_calls: Cell<usize>,
    pub forward_calls: usize,
    pub used_outputs: Vec<String>,
    pub fail_on_call: Option<usize>,
}

impl EchoRuntime {
    pub fn constant(value: f32) -> Self {
        Self {
            value,
            outputs: vec!["depth".to_string(), "unused".to_string()],
            name_calls: Cell::new(0),
            forward_calls: 0,
            used_outputs: Vec::new(),
            fail_on_call: None,
        }
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }
}

impl DepthRuntime for EchoRuntime {
    fn output_names(&self) -> Vec<String> {
        self.name_calls.set(self.name_calls.get() + 1);
        self.outputs.clone()
    }

    fn forward(&mut self, input: &Array4<f32>, output: &str) -> Result<DepthTensor, DepthError> {
        self.forward_calls += 1;
        self.used_outputs.push(output.to_string());
        if self.fail_on_call == Some(self.forward_calls) {
            return Err(DepthError::Runtime("模拟推理失败".to_string()));
        }
        let (h, w) = (input.shape()[2], input.shape()[3]);
        DepthTensor::from_shape_vec(&[1, h, w], vec![self.value; h * w])
    }
}
