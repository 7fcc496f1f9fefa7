use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '\\';

/// Escape `%`, `_` and the escape character itself so `needle` matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `LOWER(col) LIKE '%needle%'` with `needle` lowercased and escaped:
/// a case-insensitive substring match that works on every backend.
pub fn contains_ignore_case<C>(col: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// `LOWER(col) = LOWER(value)`.
pub fn eq_ignore_case<C>(col: C, value: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}
