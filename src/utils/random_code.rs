use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成指定长度的随机字母数字编码
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_random_code(12).len(), 12);
        assert_eq!(generate_random_code(0).len(), 0);
    }

    #[test]
    fn test_code_charset() {
        let code = generate_random_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_differ() {
        // 理论上可能相等，64 位字母数字串碰撞概率可以忽略
        assert_ne!(generate_random_code(64), generate_random_code(64));
    }
}
