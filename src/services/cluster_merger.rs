//! 聚类合并服务 - 业务能力层
//!
//! 按分块顺序拼接各分块的聚类，不跨分块去重或重新聚类，
//! 然后在合并后的列表上计算汇总统计

use crate::models::analysis::{Analysis, Cluster, Summary};

/// 聚类合并服务
pub struct ClusterMerger;

impl ClusterMerger {
    /// 合并各分块结果
    ///
    /// 保持分块顺序，分块内保持原顺序；空分块不贡献任何聚类
    pub fn merge(per_chunk: Vec<Vec<Cluster>>) -> Analysis {
        let clusters: Vec<Cluster> = per_chunk.into_iter().flatten().collect();
        let summary = Self::summarize(&clusters);
        Analysis { clusters, summary }
    }

    /// 计算汇总统计
    ///
    /// 三个"最大"字段在并列时取第一个出现的聚类；列表为空时只有总数
    pub fn summarize(clusters: &[Cluster]) -> Summary {
        Summary {
            total_clusters: clusters.len(),
            most_intense_cluster: max_by_metric(clusters, |c| c.emotion_intensity),
            biggest_solution_gap: max_by_metric(clusters, |c| c.solution_gap),
            most_frequent_cluster: max_by_metric(clusters, |c| c.frequency as f64),
        }
    }
}

/// 找出指标最大的聚类名称，并列时保留第一个
fn max_by_metric<F>(clusters: &[Cluster], metric: F) -> Option<String>
where
    F: Fn(&Cluster) -> f64,
{
    let mut best: Option<(&Cluster, f64)> = None;
    for cluster in clusters {
        let value = metric(cluster);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((cluster, value)),
        }
    }
    best.map(|(cluster, _)| cluster.name.clone())
}
