//! Overload resolution over a candidate member list.
//!
//! Resolution follows the ANSI SQL routine rules rather than Java's: once the
//! candidates are filtered down to the applicable ones there is no
//! most-specific selection. A single applicable candidate wins; two or more
//! make the invocation ambiguous.

use crate::signature::{ResolvedArguments, signature_convertible};
use jbind_api::{Member, TypeDirectory};
use std::fmt;

/// Flags that shape one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionFlags {
    /// Only static members qualify.
    pub static_only: bool,
    /// Candidates may declare more parameters than there are arguments, as
    /// long as every trailing parameter repeats the last argument's type.
    pub repeat_last_parameter: bool,
    /// Only varargs members qualify.
    pub varargs: bool,
}

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unique(Member),
    NoMatch,
    /// Every applicable candidate, in candidate order.
    Ambiguous(Vec<Member>),
}

impl Resolution {
    pub fn into_unique(self) -> Option<Member> {
        match self {
            Resolution::Unique(member) => Some(member),
            _ => None,
        }
    }
}

/// Why a candidate was eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Arity,
    NotStatic,
    NotVarargs,
    NameMismatch,
    TrailingType,
    Signature,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Arity => "parameter count",
            Rejection::NotStatic => "not static",
            Rejection::NotVarargs => "not varargs",
            Rejection::NameMismatch => "name",
            Rejection::TrailingType => "trailing parameter type",
            Rejection::Signature => "argument types",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Live,
    Eliminated(Rejection),
}

pub struct OverloadResolver<'a, D: ?Sized> {
    directory: &'a D,
}

impl<'a, D: TypeDirectory + ?Sized> OverloadResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Pick the member named `name` that `arguments` can be passed to.
    ///
    /// A `name` starting with `<` selects constructors and skips the name check.
    pub fn resolve(
        &self,
        name: &str,
        arguments: &ResolvedArguments,
        flags: ResolutionFlags,
        mut candidates: Vec<Member>,
    ) -> Resolution {
        let slots: Vec<Slot> = candidates
            .iter()
            .map(|candidate| match self.screen(name, arguments, flags, candidate) {
                Ok(()) => Slot::Live,
                Err(rejection) => {
                    tracing::trace!("Eliminated {}: {}", candidate, rejection);
                    Slot::Eliminated(rejection)
                }
            })
            .collect();

        let mut winner: Option<usize> = None;
        let mut ambiguous = false;
        for (index, slot) in slots.iter().enumerate() {
            if *slot != Slot::Live {
                continue;
            }
            if winner.is_none() {
                winner = Some(index);
            } else {
                ambiguous = true;
            }
        }

        let resolution = match winner {
            None => Resolution::NoMatch,
            Some(index) if !ambiguous => Resolution::Unique(candidates.swap_remove(index)),
            Some(_) => Resolution::Ambiguous(
                candidates
                    .into_iter()
                    .zip(&slots)
                    .filter(|(_, slot)| **slot == Slot::Live)
                    .map(|(candidate, _)| candidate)
                    .collect(),
            ),
        };

        tracing::debug!(
            "Resolved {}({}) against {} candidates: {}",
            name,
            arguments.render(),
            slots.len(),
            match &resolution {
                Resolution::Unique(m) => format!("unique {m}"),
                Resolution::NoMatch => "no match".to_string(),
                Resolution::Ambiguous(tied) => format!("{} tied", tied.len()),
            }
        );

        resolution
    }

    /// Run the filtering steps against one candidate, in order.
    pub fn screen(
        &self,
        name: &str,
        arguments: &ResolvedArguments,
        flags: ResolutionFlags,
        candidate: &Member,
    ) -> Result<(), Rejection> {
        let actual = arguments.len();
        let formal = candidate.parameters.len();
        let repeating = flags.repeat_last_parameter && actual > 0;

        if repeating {
            if formal < actual {
                return Err(Rejection::Arity);
            }
        } else if formal != actual {
            return Err(Rejection::Arity);
        }

        if flags.static_only && !candidate.is_static {
            return Err(Rejection::NotStatic);
        }

        if flags.varargs && !candidate.is_varargs {
            return Err(Rejection::NotVarargs);
        }

        if !name.starts_with('<') && candidate.name != name {
            return Err(Rejection::NameMismatch);
        }

        if repeating {
            let last = arguments.last().and_then(|spec| spec.object_type.as_ref());
            let trailing = &candidate.parameters[actual - 1..];
            if trailing.iter().any(|formal| Some(formal) != last) {
                return Err(Rejection::TrailingType);
            }
        }

        if !signature_convertible(self.directory, arguments, &candidate.parameters) {
            return Err(Rejection::Signature);
        }

        Ok(())
    }
}
