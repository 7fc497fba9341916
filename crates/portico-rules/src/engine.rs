//! Rule evaluation.

use crate::RuleBook;
use portico_core::{RequestContext, Response};

/// Runs every rule named in `rule_lists` against the context, in declaration
/// order.
///
/// Resolves when all rules pass; rejects with the first failure's
/// [`Response`]. A name the rule book cannot supply rejects with a 500-class
/// response — the handler declared a guard that does not exist, so the
/// request must not proceed.
///
/// Evaluation is strictly sequential: a later rule never starts before an
/// earlier one has passed, and the pipeline starts no injection resolver
/// until this function has resolved.
pub async fn run_rules(
    book: &dyn RuleBook,
    rule_lists: &[Vec<String>],
    ctx: &RequestContext,
) -> Result<(), Response> {
    for list in rule_lists {
        for name in list {
            let rule = book.rule(name).ok_or_else(|| {
                tracing::error!(rule = %name, "rule is not defined");
                Response::internal_error(format!("no rule defined under the name '{name}'"))
            })?;

            rule.check(ctx).await.map_err(|response| {
                tracing::debug!(rule = %name, status = %response.status(), "rule rejected request");
                response
            })?;
        }
    }

    Ok(())
}
