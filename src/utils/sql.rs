use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition};

/// LIKE 模式使用的转义字符
pub const LIKE_ESCAPE: char = '\\';

/// 转义 LIKE 通配符，使用户输入按字面匹配
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// `column LIKE '%term%' ESCAPE '\'`，term 中的通配符按字面处理
pub fn contains_literal<C: ColumnTrait>(column: C, term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like_pattern(term));
    Condition::all().add(column.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("50%"), "50\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("c:\\dir"), "c:\\\\dir");
    }
}
