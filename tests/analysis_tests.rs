//! 响度分析测试
//!
//! 文档级分析链（降混 → 峰值 → 归一化 → RMS-dB）的可测性质。


use wav_fixtures::{WavBuilder, minimal_8bit_mono};
use wavmeter_rms_tool::{AnalysisResult, WavError, analysis, parse_wav};

const TOLERANCE: f64 = 1e-9;

#[test]
fn test_minimal_8bit_mono_analysis_scenario() {
    let doc = parse_wav(&minimal_8bit_mono()).unwrap();
    let analysis = AnalysisResult::from_document(&doc).unwrap();

    // 峰值为 |127|
    assert_eq!(analysis.peak, 127.0);

    // 归一化因子 128/127
    let factor = 128.0 / 127.0;
    let expected: Vec<f64> = [0.0, 64.0, -64.0, 127.0].iter().map(|s| s * factor).collect();
    for (actual, expected) in analysis.normalized_samples.iter().zip(&expected) {
        assert!((actual - expected).abs() < TOLERANCE);
    }

    // dB值可计算且有限（非NaN/Infinity）
    assert!(analysis.rms_db.is_finite(), "dB值必须有限: {}", analysis.rms_db);
}

#[test]
fn test_full_scale_constant_is_zero_db() {
    // 16位满刻度恒定信号（归一化前后都处于满刻度）
    let buf = WavBuilder::new(1, 8000, 16).samples(&[32767; 64]).build();
    let doc = parse_wav(&buf).unwrap();
    let analysis = AnalysisResult::from_document(&doc).unwrap();

    // 峰值归一化把32767提升到32768，RMS恰为满刻度 → 0dB
    assert!(
        analysis.rms_db.abs() < TOLERANCE,
        "满刻度恒定信号应为0dB，实际: {}",
        analysis.rms_db
    );
}

#[test]
fn test_normalization_is_idempotent_on_target() {
    let buf = WavBuilder::new(1, 8000, 16)
        .samples(&[100, -3000, 1234, -8000, 4096])
        .build();
    let doc = parse_wav(&buf).unwrap();
    let result = AnalysisResult::from_document(&doc).unwrap();

    // 归一化后峰值等于位深天花板
    let normalized_peak = analysis::peak(&result.normalized_samples).unwrap();
    assert!((normalized_peak - 32768.0).abs() < TOLERANCE);
}

#[test]
fn test_half_energy_signal_db_value() {
    // 一半满幅、一半静音：归一化后 RMS = sqrt(0.5) → ≈ -3.0103 dB
    let mut samples = vec![16384_i64; 32];
    samples.extend(vec![0_i64; 32]);
    let buf = WavBuilder::new(1, 8000, 16).samples(&samples).build();
    let doc = parse_wav(&buf).unwrap();
    let analysis = AnalysisResult::from_document(&doc).unwrap();

    let expected = 20.0 * 0.5_f64.sqrt().log10();
    assert!(
        (analysis.rms_db - expected).abs() < TOLERANCE,
        "期望{expected}dB，实际: {}",
        analysis.rms_db
    );
}

#[test]
fn test_stereo_document_is_downmixed_by_mean() {
    // L = [1000, 2000], R = [3000, -2000] → 降混 [2000, 0]
    let buf = WavBuilder::new(2, 44100, 16)
        .samples(&[1000, 3000, 2000, -2000])
        .build();
    let doc = parse_wav(&buf).unwrap();

    let mono = analysis::stereo_to_mono_avg(&doc.data.channel_data);
    assert_eq!(mono, vec![2000.0, 0.0]);

    let analysis = AnalysisResult::from_document(&doc).unwrap();
    assert_eq!(analysis.peak, 2000.0);
}

#[test]
fn test_silent_document_fails_with_zero_peak() {
    let buf = WavBuilder::new(1, 8000, 16).samples(&[0; 16]).build();
    let doc = parse_wav(&buf).unwrap();

    match AnalysisResult::from_document(&doc) {
        Err(WavError::ZeroPeak) => {}
        other => panic!("静音输入应返回ZeroPeak，实际: {other:?}"),
    }
}

#[test]
fn test_empty_document_fails_with_empty_sequence() {
    let buf = WavBuilder::new(1, 8000, 16).build();
    let doc = parse_wav(&buf).unwrap();

    match AnalysisResult::from_document(&doc) {
        Err(WavError::EmptySequence) => {}
        other => panic!("空样本序列应返回EmptySequence，实际: {other:?}"),
    }
}

#[test]
fn test_analysis_failure_does_not_affect_sibling_analyses() {
    // 一次失败的分析不得影响其他文档的分析
    let silent = parse_wav(&WavBuilder::new(1, 8000, 16).samples(&[0; 8]).build()).unwrap();
    let good = parse_wav(&minimal_8bit_mono()).unwrap();

    assert!(AnalysisResult::from_document(&silent).is_err());
    let first = AnalysisResult::from_document(&good).unwrap();
    let second = AnalysisResult::from_document(&good).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_32bit_full_scale_uses_correct_ceiling() {
    let buf = WavBuilder::new(1, 48000, 32)
        .samples(&[i64::from(i32::MIN), 0, 0, 0])
        .build();
    let doc = parse_wav(&buf).unwrap();
    let analysis = AnalysisResult::from_document(&doc).unwrap();

    // |i32::MIN| == 2147483648 恰为32位天花板，归一化因子为1
    assert_eq!(analysis.peak, 2_147_483_648.0);
    assert!((analysis.normalized_samples[0] + 2_147_483_648.0).abs() < TOLERANCE);
}
