//! 错误路径测试
//!
//! 验证错误传播策略：解析错误立即中止整个解析、不暴露部分文档，
//! 且每个错误携带足以渲染精确诊断的结构化细节。


use wav_fixtures::WavBuilder;
use wavmeter_rms_tool::{ErrorCategory, WavError, parse_wav};

#[test]
fn test_empty_buffer_fails_with_truncated_input() {
    match parse_wav(&[]) {
        Err(WavError::TruncatedInput {
            offset,
            needed,
            remaining,
        }) => {
            assert_eq!(offset, 0);
            assert_eq!(needed, 4);
            assert_eq!(remaining, 0);
        }
        other => panic!("期望TruncatedInput，实际: {other:?}"),
    }
}

#[test]
fn test_header_only_buffer_fails_mid_fmt() {
    // 只有RIFF头，fmt块缺失
    let full = WavBuilder::new(1, 8000, 8).samples(&[1]).build();
    let mut truncated = full[..12].to_vec();
    // 回填RIFF大小使头部自身一致，失败必须发生在fmt阶段
    truncated[4..8].copy_from_slice(&4u32.to_le_bytes());

    match parse_wav(&truncated) {
        Err(WavError::TruncatedInput { offset, .. }) => assert_eq!(offset, 12),
        other => panic!("期望TruncatedInput，实际: {other:?}"),
    }
}

#[test]
fn test_every_parse_error_renders_diagnostic_detail() {
    // 各类错误的Display都必须包含关键数值，不得丢失结构化细节
    let cases: Vec<(Vec<u8>, Vec<String>)> = vec![
        (
            WavBuilder::new(1, 8000, 8)
                .samples(&[1, 2])
                .riff_size_delta(-2)
                .build(),
            vec!["36".into(), "46".into()],
        ),
        (
            WavBuilder::new(1, 44100, 16)
                .samples(&[5])
                .byte_rate_delta(100)
                .build(),
            vec!["88200".into(), "88300".into()],
        ),
        (
            WavBuilder::new(1, 8000, 24).omit_data_chunk().build(),
            vec!["24".into()],
        ),
    ];

    for (buf, expected_fragments) in cases {
        let error = parse_wav(&buf).expect_err("构造的坏文件必须解析失败");
        let message = error.to_string();
        for fragment in expected_fragments {
            assert!(
                message.contains(&fragment),
                "诊断信息应包含\"{fragment}\": {message}"
            );
        }
    }
}

#[test]
fn test_parse_errors_map_to_parse_category() {
    let bad_buffers = vec![
        WavBuilder::new(1, 8000, 8).samples(&[1]).riff_tag(b"XXXX").build(),
        WavBuilder::new(1, 8000, 8).samples(&[1]).riff_size_delta(5).build(),
        WavBuilder::new(1, 8000, 16).samples(&[1]).block_align_delta(1).build(),
        WavBuilder::new(1, 8000, 24).omit_data_chunk().build(),
    ];

    for buf in bad_buffers {
        let error = parse_wav(&buf).expect_err("坏文件必须解析失败");
        assert_eq!(
            ErrorCategory::from_wav_error(&error),
            ErrorCategory::Parse,
            "解析错误应归类为Parse: {error:?}"
        );
    }
}

#[test]
fn test_first_error_aborts_whole_parse() {
    // 同一文件同时带有RIFF大小错误和byteRate错误：
    // 状态机严格顺序推进，必须报告第一个遇到的错误
    let buf = WavBuilder::new(1, 8000, 16)
        .samples(&[1, 2])
        .riff_size_delta(3)
        .byte_rate_delta(7)
        .build();

    match parse_wav(&buf) {
        Err(WavError::SizeMismatch { .. }) => {}
        other => panic!("应先报告SizeMismatch，实际: {other:?}"),
    }
}
