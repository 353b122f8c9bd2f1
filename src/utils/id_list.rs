//! 逗号分隔 ID 列表的编解码
//!
//! asks / answers 的 img_ids 列以 "1,2,3" 形式存储。

/// 解析逗号分隔的 ID 列表，忽略空白与非法片段
pub fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

/// 编码 ID 列表，空列表编码为 None
pub fn join_id_list(ids: &[i64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 "), vec![4, 5]);
        assert_eq!(parse_id_list("7,x,8"), vec![7, 8]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn test_join_id_list() {
        assert_eq!(join_id_list(&[1, 2, 3]), Some("1,2,3".to_string()));
        assert_eq!(join_id_list(&[]), None);
    }

    #[test]
    fn test_round_trip() {
        let ids = vec![10, 20, 30];
        let encoded = join_id_list(&ids).unwrap();
        assert_eq!(parse_id_list(&encoded), ids);
    }
}
