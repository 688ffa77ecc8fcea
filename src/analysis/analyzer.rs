//! 音频响度分析引擎
//!
//! 对解码后的声道数据执行降混、峰值检测、峰值归一化和RMS-dB换算。
//! 核心公式：RMS = sqrt(Σ(smp²)/N)，dB = 20 * log10(RMS)，
//! 其中N为参与求和的全部归一化样本数。
//!
//! 所有函数都是解码文档的纯函数，不同文档的分析之间不共享任何可变状态。

use crate::error::{WavError, WavResult};
use crate::parser::WavDocument;

/// 一次分析的派生结果，始终从文档的声道数据重新计算
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// 降混后信号的峰值（绝对值最大值）
    pub peak: f64,
    /// 峰值归一化后的样本序列（峰值达到位深天花板）
    pub normalized_samples: Vec<f64>,
    /// 相对满刻度的RMS响度 (dB)
    pub rms_db: f64,
}

impl AnalysisResult {
    /// 对完整解析的WAV文档执行分析链：降混 → 峰值 → 归一化 → RMS-dB
    pub fn from_document(doc: &WavDocument) -> WavResult<Self> {
        let ceiling = doc.fmt.bit_depth()?.ceiling();
        let mono = stereo_to_mono_avg(&doc.data.channel_data);
        let peak = peak(&mono)?;
        let normalized_samples = peak_normalize(&mono, ceiling)?;
        let rms_db = rms_db(&normalized_samples, ceiling)?;
        Ok(Self {
            peak,
            normalized_samples,
            rms_db,
        })
    }
}

/// 立体声平均降混
///
/// - 双声道：逐元素算术平均
/// - 单声道：原样返回（仅做浮点转换）
/// - 超过2声道：仅取声道0（本库不定义立体声以外的降混）
pub fn stereo_to_mono_avg(channel_data: &[Vec<i64>]) -> Vec<f64> {
    match channel_data {
        [left, right] => left
            .iter()
            .zip(right.iter())
            .map(|(&l, &r)| (l as f64 + r as f64) / 2.0)
            .collect(),
        [first, ..] => first.iter().map(|&s| s as f64).collect(),
        [] => Vec::new(),
    }
}

/// 样本序列的峰值：绝对值的最大值
///
/// 空序列返回`EmptySequence`而不是未定义值。
pub fn peak(samples: &[f64]) -> WavResult<f64> {
    if samples.is_empty() {
        return Err(WavError::EmptySequence);
    }
    Ok(samples.iter().fold(0.0_f64, |max, &s| max.max(s.abs())))
}

/// 峰值归一化：每个样本乘以 ceiling / peak
///
/// 峰值为0（静音输入）返回`ZeroPeak`而不是除以零。
pub fn peak_normalize(samples: &[f64], ceiling: f64) -> WavResult<Vec<f64>> {
    let peak_value = peak(samples)?;
    if peak_value == 0.0 {
        return Err(WavError::ZeroPeak);
    }
    let factor = ceiling / peak_value;
    Ok(samples.iter().map(|&s| s * factor).collect())
}

/// RMS-dB换算
///
/// 每个样本除以天花板归一到单位区间，累积平方和，
/// RMS取全部样本数N为除数（而非N/2），返回 20 * log10(RMS)。
pub fn rms_db(samples: &[f64], ceiling: f64) -> WavResult<f64> {
    if samples.is_empty() {
        return Err(WavError::EmptySequence);
    }
    let sum_of_squares: f64 = samples
        .iter()
        .map(|&s| {
            let unit = s / ceiling;
            unit * unit
        })
        .sum();
    if sum_of_squares == 0.0 {
        return Err(WavError::ZeroPeak);
    }
    let rms = (sum_of_squares / samples.len() as f64).sqrt();
    Ok(20.0 * rms.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_stereo_downmix_is_elementwise_mean() {
        let channels = vec![vec![2, 4, -6], vec![4, -4, -2]];
        assert_eq!(stereo_to_mono_avg(&channels), vec![3.0, 0.0, -4.0]);
    }

    #[test]
    fn test_mono_downmix_is_identity() {
        let channels = vec![vec![1, -2, 3]];
        assert_eq!(stereo_to_mono_avg(&channels), vec![1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_multichannel_downmix_uses_channel_zero() {
        let channels = vec![vec![7, 8], vec![100, 100], vec![-100, -100]];
        assert_eq!(stereo_to_mono_avg(&channels), vec![7.0, 8.0]);
    }

    #[test]
    fn test_peak_is_max_absolute_value() {
        assert_eq!(peak(&[0.0, 64.0, -127.0, 100.0]).unwrap(), 127.0);
        // i32::MIN的幅度在i64→f64路径下可被正确表示
        assert_eq!(
            peak(&[i32::MIN as f64, 1000.0]).unwrap(),
            2_147_483_648.0
        );
    }

    #[test]
    fn test_peak_rejects_empty_sequence() {
        assert!(matches!(peak(&[]), Err(WavError::EmptySequence)));
    }

    #[test]
    fn test_normalize_reaches_ceiling() {
        let normalized = peak_normalize(&[0.0, 64.0, -64.0, 127.0], 128.0).unwrap();
        let new_peak = peak(&normalized).unwrap();
        assert!((new_peak - 128.0).abs() < TOLERANCE, "归一化后峰值应为128");
        // 归一化因子 128/127
        assert!((normalized[1] - 64.0 * 128.0 / 127.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_normalize_rejects_silent_input() {
        assert!(matches!(
            peak_normalize(&[0.0, 0.0, 0.0], 32768.0),
            Err(WavError::ZeroPeak)
        ));
    }

    #[test]
    fn test_full_scale_constant_is_zero_db() {
        let samples = vec![32768.0; 1000];
        let db = rms_db(&samples, 32768.0).unwrap();
        assert!(db.abs() < TOLERANCE, "满刻度恒定信号应为0dB，实际: {db}");
    }

    #[test]
    fn test_half_scale_constant_db_value() {
        let samples = vec![16384.0; 256];
        let db = rms_db(&samples, 32768.0).unwrap();
        let expected = 20.0 * 0.5_f64.log10(); // ≈ -6.0206
        assert!((db - expected).abs() < TOLERANCE, "半刻度应为{expected}dB，实际: {db}");
    }

    #[test]
    fn test_rms_uses_full_sample_count() {
        // 一半满刻度、一半零：N取全长时 RMS = sqrt(0.5)
        let mut samples = vec![128.0; 100];
        samples.extend(vec![0.0; 100]);
        let db = rms_db(&samples, 128.0).unwrap();
        let expected = 20.0 * 0.5_f64.sqrt().log10();
        assert!((db - expected).abs() < TOLERANCE);
    }

    #[test]
    fn test_rms_rejects_degenerate_input() {
        assert!(matches!(rms_db(&[], 128.0), Err(WavError::EmptySequence)));
        assert!(matches!(
            rms_db(&[0.0, 0.0], 128.0),
            Err(WavError::ZeroPeak)
        ));
    }
}
