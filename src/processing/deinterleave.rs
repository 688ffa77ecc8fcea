//! 声道样本分离引擎
//!
//! 将交错的扁平样本流按轮询方式重组为逐声道的有序序列。
//! 保证声道内时间顺序不变，且所有声道长度一致。

/// 声道去交错器
///
/// 按 声道0、声道1、…、声道N-1 的循环顺序累积样本。
#[derive(Debug)]
pub struct ChannelDeinterleaver {
    channels: Vec<Vec<i64>>,
    next_channel: usize,
    total_pushed: usize,
}

impl ChannelDeinterleaver {
    /// 创建去交错器并预分配每声道容量
    ///
    /// # 参数
    ///
    /// * `num_channels` - 声道数量（调用方保证 >= 1）
    /// * `total_samples` - 预计的扁平样本总数（用于容量预分配）
    pub fn new(num_channels: usize, total_samples: usize) -> Self {
        let per_channel = total_samples / num_channels.max(1);
        Self {
            channels: (0..num_channels)
                .map(|_| Vec::with_capacity(per_channel))
                .collect(),
            next_channel: 0,
            total_pushed: 0,
        }
    }

    /// 按轮询顺序接收下一个解码样本
    #[inline]
    pub fn push(&mut self, sample: i64) {
        self.channels[self.next_channel].push(sample);
        self.next_channel = (self.next_channel + 1) % self.channels.len();
        self.total_pushed += 1;
    }

    /// 已接收的样本总数
    #[inline]
    pub fn total_pushed(&self) -> usize {
        self.total_pushed
    }

    /// 完成分离，产出逐声道序列
    ///
    /// 后置条件：所有声道长度一致，元素总数等于已接收样本数。
    /// 调用方以完整帧为单位推送样本（数据块大小按帧对齐校验），
    /// 因此这里用debug断言而非运行时错误。
    pub fn into_channels(self) -> Vec<Vec<i64>> {
        debug_assert!(
            self.channels.windows(2).all(|w| w[0].len() == w[1].len()),
            "去交错后声道长度必须一致"
        );
        debug_assert_eq!(
            self.channels.iter().map(Vec::len).sum::<usize>(),
            self.total_pushed,
            "去交错必须保持样本总数不变"
        );
        self.channels
    }
}
