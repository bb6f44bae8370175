//! The colony arena: every lycanthrope and every pack, keyed by handle.
//!
//! A pack tracks membership by [`LycanId`]; a lycanthrope points back to
//! its pack by [`PackId`]. Neither owns the other. The colony owns both
//! and keeps the two sides consistent:
//!
//! - every member listed by a pack has `pack == Some(that pack)`
//! - the filled alpha slots are always members of the pack
//! - a human is never a member of any pack

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use gallia_types::{AgeCategory, IdGenerator, LycanId, Lycanthrope, PackId, Rank, Sex};

use crate::error::PackError;
use crate::level::compute_level;

// ---------------------------------------------------------------------------
// Alpha couple
// ---------------------------------------------------------------------------

/// The male and female holding the top of a pack. Either slot may fall
/// vacant when no successor exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlphaCouple {
    male: Option<LycanId>,
    female: Option<LycanId>,
}

impl AlphaCouple {
    /// Build a couple from one male and one female, both non-human and
    /// unpacked.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::WrongSex`] if either has the wrong sex,
    /// [`PackError::Human`] if either is human, or
    /// [`PackError::AlreadyPacked`] if either already runs with a pack.
    pub fn new(male: &Lycanthrope, female: &Lycanthrope) -> Result<Self, PackError> {
        for (candidate, expected) in [(male, Sex::Male), (female, Sex::Female)] {
            if candidate.sex != expected {
                return Err(PackError::WrongSex {
                    lycan: candidate.id,
                    expected,
                });
            }
            if candidate.is_human {
                return Err(PackError::Human(candidate.id));
            }
            if let Some(pack) = candidate.pack {
                return Err(PackError::AlreadyPacked {
                    lycan: candidate.id,
                    pack,
                });
            }
        }
        Ok(Self {
            male: Some(male.id),
            female: Some(female.id),
        })
    }

    /// The male alpha, if the slot is filled.
    pub const fn male(&self) -> Option<LycanId> {
        self.male
    }

    /// The female alpha, if the slot is filled.
    pub const fn female(&self) -> Option<LycanId> {
        self.female
    }

    /// The slot for `sex`.
    pub const fn slot(&self, sex: Sex) -> Option<LycanId> {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }

    /// Whether both slots are filled.
    pub const fn is_complete(&self) -> bool {
        self.male.is_some() && self.female.is_some()
    }

    /// Whether `id` holds either slot.
    pub fn contains(&self, id: LycanId) -> bool {
        self.male == Some(id) || self.female == Some(id)
    }

    pub(crate) const fn set_slot(&mut self, sex: Sex, id: Option<LycanId>) {
        match sex {
            Sex::Male => self.male = id,
            Sex::Female => self.female = id,
        }
    }
}

// ---------------------------------------------------------------------------
// Pack
// ---------------------------------------------------------------------------

/// A pack: a name, an alpha couple and the roster of member handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pack {
    /// Unique identifier.
    pub id: PackId,
    /// Display name.
    pub name: String,
    couple: AlphaCouple,
    members: Vec<LycanId>,
}

impl Pack {
    /// The alpha couple.
    pub const fn couple(&self) -> &AlphaCouple {
        &self.couple
    }

    /// Member handles in joining order, alpha couple included.
    pub fn members(&self) -> &[LycanId] {
        &self.members
    }

    /// Whether `id` is a member.
    pub fn has_member(&self, id: LycanId) -> bool {
        self.members.contains(&id)
    }

    /// Hand the `sex` alpha slot to a member.
    pub(crate) const fn replace_alpha(&mut self, sex: Sex, id: LycanId) {
        self.couple.set_slot(sex, Some(id));
    }
}

/// Result of filling a vacated alpha slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Succession {
    /// The best candidate of the vacated sex was promoted.
    Promoted {
        /// The pack.
        pack: PackId,
        /// The new alpha.
        successor: LycanId,
    },
    /// Nobody of that sex was left; the slot stays vacant.
    NoSuccessor {
        /// The pack.
        pack: PackId,
        /// The vacant slot.
        sex: Sex,
    },
}

// ---------------------------------------------------------------------------
// Colony
// ---------------------------------------------------------------------------

/// All lycanthropes and packs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Colony {
    lycans: BTreeMap<LycanId, Lycanthrope>,
    packs: BTreeMap<PackId, Pack>,
}

impl Colony {
    /// Create an empty colony.
    pub const fn new() -> Self {
        Self {
            lycans: BTreeMap::new(),
            packs: BTreeMap::new(),
        }
    }

    /// Create an unpacked lycanthrope with a fresh id.
    pub fn spawn(
        &mut self,
        ids: &mut IdGenerator,
        name: impl Into<String>,
        sex: Sex,
        age: AgeCategory,
        strength: u32,
        impetuosity: f64,
    ) -> LycanId {
        let id: LycanId = ids.next_id();
        self.lycans
            .insert(id, Lycanthrope::new(id, name, sex, age, strength, impetuosity));
        id
    }

    /// Look up a lycanthrope.
    pub fn lycan(&self, id: LycanId) -> Option<&Lycanthrope> {
        self.lycans.get(&id)
    }

    /// Look up a lycanthrope mutably. Pack handles must not be edited
    /// through this reference.
    pub fn lycan_mut(&mut self, id: LycanId) -> Option<&mut Lycanthrope> {
        self.lycans.get_mut(&id)
    }

    pub(crate) fn require(&self, id: LycanId) -> Result<&Lycanthrope, PackError> {
        self.lycans.get(&id).ok_or(PackError::UnknownLycan(id))
    }

    pub(crate) fn require_mut(&mut self, id: LycanId) -> Result<&mut Lycanthrope, PackError> {
        self.lycans.get_mut(&id).ok_or(PackError::UnknownLycan(id))
    }

    /// Look up a pack.
    pub fn pack(&self, id: PackId) -> Option<&Pack> {
        self.packs.get(&id)
    }

    pub(crate) fn require_pack(&self, id: PackId) -> Result<&Pack, PackError> {
        self.packs.get(&id).ok_or(PackError::UnknownPack(id))
    }

    pub(crate) fn require_pack_mut(&mut self, id: PackId) -> Result<&mut Pack, PackError> {
        self.packs.get_mut(&id).ok_or(PackError::UnknownPack(id))
    }

    /// Every lycanthrope, in id order.
    pub fn lycans(&self) -> impl Iterator<Item = &Lycanthrope> {
        self.lycans.values()
    }

    /// Every pack, in id order.
    pub fn packs(&self) -> impl Iterator<Item = &Pack> {
        self.packs.values()
    }

    /// Ids of every lycanthrope, in order.
    pub fn lycan_ids(&self) -> Vec<LycanId> {
        self.lycans.keys().copied().collect()
    }

    /// Ids of every pack, in order.
    pub fn pack_ids(&self) -> Vec<PackId> {
        self.packs.keys().copied().collect()
    }

    /// Number of lycanthropes that have not turned human.
    pub fn wolves(&self) -> usize {
        self.lycans.values().filter(|l| !l.is_human).count()
    }

    /// Computed level of a lycanthrope.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] for an unknown id.
    pub fn level_of(&self, id: LycanId) -> Result<f64, PackError> {
        self.require(id).map(compute_level)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Found a pack around an alpha couple. Both alphas take the alpha rank.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] or any construction error of
    /// [`AlphaCouple::new`].
    pub fn found_pack(
        &mut self,
        ids: &mut IdGenerator,
        name: impl Into<String>,
        male: LycanId,
        female: LycanId,
    ) -> Result<PackId, PackError> {
        let couple = AlphaCouple::new(self.require(male)?, self.require(female)?)?;
        let id: PackId = ids.next_id();
        for alpha in [male, female] {
            let lycan = self.require_mut(alpha)?;
            lycan.pack = Some(id);
            lycan.rank = Rank::ALPHA;
        }
        let pack = Pack {
            id,
            name: name.into(),
            couple,
            members: vec![male, female],
        };
        info!(pack = %id, name = %pack.name, male = %male, female = %female, "Pack founded");
        self.packs.insert(id, pack);
        Ok(id)
    }

    /// Add an unpacked, non-human lycanthrope to a pack at omega rank.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`], [`PackError::UnknownPack`],
    /// [`PackError::Human`] or [`PackError::AlreadyPacked`].
    pub fn join_pack(&mut self, lycan: LycanId, pack: PackId) -> Result<(), PackError> {
        self.require_pack(pack)?;
        let member = self.require_mut(lycan)?;
        if member.is_human {
            return Err(PackError::Human(lycan));
        }
        if let Some(current) = member.pack {
            return Err(PackError::AlreadyPacked {
                lycan,
                pack: current,
            });
        }
        member.pack = Some(pack);
        member.rank = Rank::OMEGA;
        self.require_pack_mut(pack)?.members.push(lycan);
        debug!(lycan = %lycan, pack = %pack, "Joined pack");
        Ok(())
    }

    /// Detach a lycanthrope from its pack. If it was an alpha, the slot is
    /// refilled by succession.
    ///
    /// Returns the succession, if one was needed.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] or [`PackError::NotPacked`].
    pub fn leave_pack(&mut self, lycan: LycanId) -> Result<Option<Succession>, PackError> {
        let member = self.require_mut(lycan)?;
        let pack_id = member.pack.ok_or(PackError::NotPacked(lycan))?;
        let sex = member.sex;
        member.pack = None;
        member.rank = Rank::OMEGA;

        let pack = self.require_pack_mut(pack_id)?;
        pack.members.retain(|&m| m != lycan);
        let was_alpha = pack.couple.slot(sex) == Some(lycan);
        if was_alpha {
            pack.couple.set_slot(sex, None);
        }
        debug!(lycan = %lycan, pack = %pack_id, was_alpha, "Left pack");

        if was_alpha {
            self.succeed(pack_id, sex).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Fill the `sex` alpha slot of a pack with its best remaining
    /// non-human member of that sex, ranked by computed level.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownPack`] for an unknown pack.
    pub fn succeed(&mut self, pack_id: PackId, sex: Sex) -> Result<Succession, PackError> {
        let pack = self.require_pack(pack_id)?;
        let successor = pack
            .members
            .iter()
            .filter_map(|id| self.lycans.get(id))
            .filter(|l| l.sex == sex && !l.is_human && !pack.couple.contains(l.id))
            .map(|l| (l.id, compute_level(l)))
            // Highest level wins; ties go to the earliest joiner.
            .fold(None, |best: Option<(LycanId, f64)>, candidate| match best {
                Some(current) if current.1 >= candidate.1 => Some(current),
                _ => Some(candidate),
            })
            .map(|(id, _)| id);

        let Some(successor) = successor else {
            info!(pack = %pack_id, sex = ?sex, "No successor for alpha slot");
            return Ok(Succession::NoSuccessor { pack: pack_id, sex });
        };

        self.require_mut(successor)?.rank = Rank::ALPHA;
        self.require_pack_mut(pack_id)?
            .couple
            .set_slot(sex, Some(successor));
        info!(pack = %pack_id, successor = %successor, sex = ?sex, "Alpha succession");
        Ok(Succession::Promoted {
            pack: pack_id,
            successor,
        })
    }

    // -----------------------------------------------------------------------
    // Aging
    // -----------------------------------------------------------------------

    /// Move a lycanthrope to the next age bracket. Old stays old.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnknownLycan`] for an unknown id.
    pub fn age(&mut self, lycan: LycanId) -> Result<AgeCategory, PackError> {
        let member = self.require_mut(lycan)?;
        member.age = member.age.older();
        Ok(member.age)
    }
}
