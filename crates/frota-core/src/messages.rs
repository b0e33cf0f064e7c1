//! pt-BR phrasing of time spans

use frota_api::DateOffset;

/// Coarsest unit a message may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Granularity {
    /// years → months → days
    Years,
    /// months → days
    Months,
}

/// Render the coarsest non-zero unit of an offset, e.g. `2 anos`, `1 mês`,
/// `45 dias`.
pub(crate) fn describe_span(offset: &DateOffset, granularity: Granularity) -> String {
    let years = offset.years();
    if granularity == Granularity::Years && years >= 1 {
        return quantity(years, "ano", "anos");
    }
    if offset.months >= 1 {
        return quantity(offset.months, "mês", "meses");
    }
    quantity(offset.days, "dia", "dias")
}

fn quantity(n: u32, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}
