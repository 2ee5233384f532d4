//! 库存类计数列的条件更新表达式
//!
//! 本模块只引入 `ExprTrait`，不引入 `ColumnTrait`。

use sea_orm::sea_query::{Expr, ExprTrait, IntoColumnRef, SimpleExpr};

/// `column - amount`
pub(super) fn decremented<C: IntoColumnRef>(column: C, amount: i32) -> SimpleExpr {
    Expr::col(column).sub(amount)
}

/// `column + amount`，结果不超过 `ceiling` 列
pub(super) fn incremented_capped<C, T>(column: C, amount: i32, ceiling: T) -> SimpleExpr
where
    C: IntoColumnRef + Copy,
    T: IntoColumnRef + Copy,
{
    Expr::case(
        Expr::col(column).add(amount).gt(Expr::col(ceiling)),
        Expr::col(ceiling),
    )
    .finally(Expr::col(column).add(amount))
    .into()
}
