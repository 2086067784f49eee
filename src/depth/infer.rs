use log::debug;
use ndarray::Array4;
use ort::{inputs, session::Session};

use crate::depth::array::{DepthTensor, to_input};
use crate::error::{DepthError, Result};

/// 推理运行时的最小契约
///
/// 由外部推理引擎实现（生产环境为 ONNX Runtime），测试中可替换为模拟实现。
pub trait DepthRuntime {
    /// 计算图中无下游消费者的输出层名称，按运行时自身的顺序排列
    fn output_names(&self) -> Vec<String>;

    /// 对输入张量执行一次前向推理，返回指定输出层的结果
    fn forward(&mut self, input: &Array4<f32>, output: &str) -> Result<DepthTensor>;
}

/// 推理引擎封装
///
/// 输出层名称在第一次推理时解析一次（取第一个输出），之后整个进程生命周期内复用。
pub struct InferenceEngine<R: DepthRuntime> {
    runtime: R,
    output_name: Option<String>,
}

impl<R: DepthRuntime> InferenceEngine<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            output_name: None,
        }
    }

    /// 已解析的输出层名称；尚未推理过时为 None
    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// 运行模型推理
    ///
    /// # 参数
    /// * `input` - 输入张量，形状应为(1, 3, height, width)
    ///
    /// # 返回值
    /// 返回原始深度张量，逻辑形状为(1, height, width)
    ///
    /// # 错误处理
    /// 运行时没有任何输出层，或推理失败时返回Err
    pub fn forward(&mut self, input: &Array4<f32>) -> Result<DepthTensor> {
        let output = match &self.output_name {
            Some(name) => name.clone(),
            None => {
                let name = self.resolve_output_name()?;
                self.output_name = Some(name.clone());
                name
            }
        };
        self.runtime.forward(input, &output)
    }

    fn resolve_output_name(&self) -> Result<String> {
        let name = self
            .runtime
            .output_names()
            .into_iter()
            .next()
            .ok_or_else(|| DepthError::Runtime("模型没有输出层".to_string()))?;
        debug!("解析输出层名称: {}", name);
        Ok(name)
    }
}

/// 基于 ONNX Runtime 的推理运行时
pub struct OrtRuntime {
    session: Session,
    input_name: String,
}

impl OrtRuntime {
    /// 包装已加载的会话，记录第一个输入的名称
    pub fn new(session: Session) -> Result<Self> {
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| DepthError::Runtime("模型没有输入层".to_string()))?;
        Ok(Self {
            session,
            input_name,
        })
    }
}

impl DepthRuntime for OrtRuntime {
    fn output_names(&self) -> Vec<String> {
        self.session
            .outputs
            .iter()
            .map(|output| output.name.clone())
            .collect()
    }

    fn forward(&mut self, input: &Array4<f32>, output: &str) -> Result<DepthTensor> {
        let input_tensor = to_input(input)?;
        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => input_tensor])?;

        // 提取输出并处理
        let (shape, data) = outputs[output].try_extract_tensor::<f32>()?;
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        DepthTensor::from_shape_vec(&dims, data.to_vec())
    }
}
