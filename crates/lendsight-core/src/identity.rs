//! Synthetic client identities: company-style names and contact e-mails.

use crate::config::NameFragments;
use crate::rng::GenerationContext;

/// A company name such as `"Klein Group"`, or a two-firm partnership such as
/// `"Chavez & Morgan Partners"` with probability `combined_name_probability`.
///
/// The two firms of a partnership are always distinct.
pub fn client_name(ctx: &mut GenerationContext, names: &NameFragments) -> String {
    if ctx.chance(names.combined_name_probability) {
        let first = ctx.choose(&names.prefixes);
        let mut second = ctx.choose(&names.prefixes);
        while second == first {
            second = ctx.choose(&names.prefixes);
        }
        let connector = ctx.choose(&names.connectors);
        let suffix = ctx.choose(&names.suffixes);
        format!("{first}{connector}{second} {suffix}")
    } else {
        let firm = ctx.choose(&names.prefixes);
        let suffix = ctx.choose(&names.suffixes);
        format!("{firm} {suffix}")
    }
}

/// A contact address like `morgan42@outlook.com`. Not unique across clients.
pub fn email(ctx: &mut GenerationContext, names: &NameFragments) -> String {
    let user = ctx.choose(&names.prefixes).to_lowercase();
    let number = ctx.uniform_int(10, 99);
    let domain = ctx.choose(&names.email_domains);
    format!("{user}{number}@{domain}")
}
