//! 张量处理模块
//!
//! 提供 ndarray 与 ONNX Runtime 张量之间的转换，以及网络输出的深度张量封装。

use ndarray::{Array, Array4, ArrayD, ArrayView2, Dimension, IxDyn};
use ort::value::Tensor;

use crate::error::{DepthError, Result};

/// 将ndarray数组转换为ONNX Runtime张量
///
/// # 参数
/// * `mats` - 四维数组，形状为(1, 3, height, width)
///
/// # 返回值
/// 返回对应的ONNX Runtime张量
pub fn to_input(mats: &Array4<f32>) -> Result<Tensor<f32>> {
    let shape: Vec<usize> = mats.shape().to_vec();
    let data: Vec<f32> = mats.iter().copied().collect();
    let tensor = Tensor::from_array(([shape[0], shape[1], shape[2], shape[3]], data))?;
    Ok(tensor)
}

/// 网络输出的原始深度张量
///
/// 逻辑形状为 (1, H', W')，同时保存数据与形状信息。
pub struct DepthTensor {
    data: ArrayD<f32>,
}

impl DepthTensor {
    /// 由形状和扁平数据创建深度张量
    ///
    /// # 错误处理
    /// 数据长度与形状不一致时返回 `DepthError::Shape`
    pub fn from_shape_vec(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let data = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(Self { data })
    }

    pub fn from_array<D: Dimension>(array: Array<f32, D>) -> Self {
        Self {
            data: array.into_dyn(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn as_array(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// 把 (1, H', W') 重新解释为 (H', W') 视图，不复制数据
    ///
    /// 只有当前导维度全为 1 且数据为标准连续布局时才成立，
    /// 其他布局在此处直接报错，由运行时适配层负责转换。
    pub fn as_map(&self) -> Result<ArrayView2<'_, f32>> {
        let shape = self.data.shape();
        let ndim = shape.len();
        if ndim < 2 {
            return Err(DepthError::Shape(format!(
                "深度输出至少需要二维，实际形状 {:?}",
                shape
            )));
        }
        if shape[..ndim - 2].iter().any(|&d| d != 1) {
            return Err(DepthError::Shape(format!(
                "深度输出前导维度必须为 1，实际形状 {:?}",
                shape
            )));
        }
        let (height, width) = (shape[ndim - 2], shape[ndim - 1]);
        if height == 0 || width == 0 {
            return Err(DepthError::Shape(format!("深度输出为空，形状 {:?}", shape)));
        }
        if !self.data.is_standard_layout() {
            return Err(DepthError::Shape("深度输出不是连续布局".to_string()));
        }
        let map = self.data.view().into_shape_with_order((height, width))?;
        Ok(map)
    }
}
