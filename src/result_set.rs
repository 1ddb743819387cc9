// used for internal result sets
use roaring::RoaringTreemap;

use crate::identity::Identity;
use crate::index::IdentitySet;

// Identities are signed; the bitmap stores their two's complement bits.
fn bits(identity: Identity) -> u64 {
    identity as u64
}
fn identity(bits: u64) -> Identity {
    bits as Identity
}

/// Candidate statement identities gathered while evaluating a pattern.
///
/// Most selections bind one or two positions and end up with very few
/// candidates, so the single-identity case avoids building a bitmap at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultSet {
    #[default]
    Empty,
    Single(Identity),
    Multi(RoaringTreemap),
}

impl ResultSet {
    pub fn new() -> Self {
        ResultSet::Empty
    }
    pub fn from_identities(identities: &IdentitySet) -> Self {
        let mut result = ResultSet::new();
        for identity in identities {
            result.push(*identity);
        }
        result
    }
    pub fn push(&mut self, pushed: Identity) {
        match self {
            ResultSet::Empty => *self = ResultSet::Single(pushed),
            ResultSet::Single(kept) => {
                if *kept != pushed {
                    let mut multi = RoaringTreemap::new();
                    multi.insert(bits(*kept));
                    multi.insert(bits(pushed));
                    *self = ResultSet::Multi(multi);
                }
            }
            ResultSet::Multi(multi) => {
                multi.insert(bits(pushed));
            }
        }
    }
    pub fn contains(&self, member: Identity) -> bool {
        match self {
            ResultSet::Empty => false,
            ResultSet::Single(kept) => *kept == member,
            ResultSet::Multi(multi) => multi.contains(bits(member)),
        }
    }
    pub fn intersect_with(&mut self, other: &ResultSet) {
        let narrowed = match (&*self, other) {
            (ResultSet::Empty, _) | (_, ResultSet::Empty) => ResultSet::Empty,
            (ResultSet::Single(kept), _) => {
                if other.contains(*kept) {
                    return;
                }
                ResultSet::Empty
            }
            (ResultSet::Multi(multi), ResultSet::Single(member)) => {
                if multi.contains(bits(*member)) {
                    ResultSet::Single(*member)
                } else {
                    ResultSet::Empty
                }
            }
            (ResultSet::Multi(multi), ResultSet::Multi(other_multi)) => {
                Self::collapse(multi & other_multi)
            }
        };
        *self = narrowed;
    }
    /// Narrows the set to identities also present in an index lookup.
    pub fn intersect_with_identities(&mut self, identities: &IdentitySet) {
        let narrowed = match &*self {
            ResultSet::Empty => return,
            ResultSet::Single(kept) => {
                if identities.contains(kept) {
                    return;
                }
                ResultSet::Empty
            }
            ResultSet::Multi(multi) => Self::collapse(
                multi
                    .iter()
                    .filter(|b| identities.contains(&identity(*b)))
                    .collect(),
            ),
        };
        *self = narrowed;
    }
    fn collapse(multi: RoaringTreemap) -> ResultSet {
        match multi.len() {
            0 => ResultSet::Empty,
            1 => match multi.min() {
                Some(b) => ResultSet::Single(identity(b)),
                None => ResultSet::Empty,
            },
            _ => ResultSet::Multi(multi),
        }
    }
    pub fn len(&self) -> u64 {
        match self {
            ResultSet::Empty => 0,
            ResultSet::Single(_) => 1,
            ResultSet::Multi(multi) => multi.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, ResultSet::Empty)
    }
    pub fn iter(&self) -> Box<dyn Iterator<Item = Identity> + '_> {
        match self {
            ResultSet::Empty => Box::new(std::iter::empty()),
            ResultSet::Single(kept) => Box::new(std::iter::once(*kept)),
            ResultSet::Multi(multi) => Box::new(multi.iter().map(identity)),
        }
    }
}
