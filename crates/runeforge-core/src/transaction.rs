//! Transactional actions on a session.
//!
//! [`TransactionExecutor::apply`] runs one [`Action`] against a session:
//!
//! 1. **Plan**: check the target, the slot, and its provenance, and price
//!    the action
//! 2. **Afford**: unless unlimited, check the power requirement, currency,
//!    and experience
//! 3. **Mutate**: roll the level, write the enchantment, consume the
//!    catalyst, and charge
//! 4. **Reseed**: advance the seed once and recompute the options
//!
//! Steps 1 and 2 never touch state, and step 3 cannot fail, so an `Err`
//! always leaves the session and the player's resources as they were.

use runeforge_world::BlockQuery;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::catalog::{EnchantmentDefinition, EnchantmentId};
use crate::cost::{enchant_cost, reroll_cost, upgrade_cost, ActionCost};
use crate::error::{EnchantError, EnchantResult};
use crate::item::{ItemRules, ItemStack, ItemTraits};
use crate::level::roll;
use crate::resolver::OptionResolver;
use crate::session::Session;
use crate::slots::Provenance;

// =============================================================================
// Actions
// =============================================================================

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Raise the level of the Upgrade option in the slot
    UpgradeAt(usize),
    /// Copy the Transfer option in the slot from the catalyst
    TransferAt(usize),
    /// Apply the Generate option in the slot
    ApplyAt(usize),
    /// Pay to advance the seed and regenerate
    Reroll,
}

impl Action {
    /// Slot the action targets, if any.
    #[must_use]
    pub fn slot(self) -> Option<usize> {
        match self {
            Self::UpgradeAt(slot) | Self::TransferAt(slot) | Self::ApplyAt(slot) => Some(slot),
            Self::Reroll => None,
        }
    }

    fn provenance(self) -> Option<Provenance> {
        match self {
            Self::UpgradeAt(_) => Some(Provenance::Upgrade),
            Self::TransferAt(_) => Some(Provenance::Transfer),
            Self::ApplyAt(_) => Some(Provenance::Generate),
            Self::Reroll => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpgradeAt(slot) => write!(f, "upgrade slot {slot}"),
            Self::TransferAt(slot) => write!(f, "transfer slot {slot}"),
            Self::ApplyAt(slot) => write!(f, "apply slot {slot}"),
            Self::Reroll => write!(f, "reroll"),
        }
    }
}

/// The acting player's resources outside the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Experience levels
    pub experience: u32,
}

impl Resources {
    /// Create resources with `experience` levels.
    #[must_use]
    pub const fn new(experience: u32) -> Self {
        Self { experience }
    }
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// The action that ran
    pub action: Action,
    /// What was actually charged (free when unlimited)
    pub charged: ActionCost,
    /// Enchantment written and its final level; `None` for a reroll
    pub enchantment: Option<(EnchantmentId, u32)>,
    /// Whether one catalyst item was used up
    pub catalyst_consumed: bool,
}

// =============================================================================
// Planning
// =============================================================================

/// A validated, priced action. Holds everything the mutation needs.
struct Plan<'c> {
    cost: ActionCost,
    write: Option<Enchanting<'c>>,
}

/// The enchantment a slot action writes.
struct Enchanting<'c> {
    slot: usize,
    definition: &'c EnchantmentDefinition,
    floor: u32,
    provenance: Provenance,
}

// =============================================================================
// Executor
// =============================================================================

/// Validates, prices, and executes actions.
#[derive(Debug, Clone, Copy)]
pub struct TransactionExecutor<'a> {
    resolver: OptionResolver<'a>,
}

impl<'a> TransactionExecutor<'a> {
    /// Create an executor that recomputes with `resolver`.
    #[must_use]
    pub fn new(resolver: OptionResolver<'a>) -> Self {
        Self { resolver }
    }

    /// The resolver used for recomputes.
    #[must_use]
    pub fn resolver(&self) -> &OptionResolver<'a> {
        &self.resolver
    }

    /// What `action` would cost right now.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`Self::apply`] would fail before checking
    /// resources.
    pub fn quote(&self, action: Action, session: &Session) -> EnchantResult<ActionCost> {
        self.plan(action, session).map(|plan| plan.cost)
    }

    /// Run `action` against `session`.
    ///
    /// With `unlimited` set, resources and power requirements are neither
    /// checked nor charged.
    ///
    /// # Errors
    ///
    /// - [`EnchantError::NoTarget`] / [`EnchantError::NotEnchantable`]
    /// - [`EnchantError::InvalidSlot`], [`EnchantError::WrongProvenance`],
    ///   [`EnchantError::StaleSlot`], [`EnchantError::UnknownEnchantment`]
    /// - [`EnchantError::AlreadyMaxed`] for an upgrade at max level
    /// - [`EnchantError::MissingCatalyst`] for a transfer without catalyst
    /// - [`EnchantError::RerollUnavailable`] when any option is a transfer
    ///   or none is generated
    /// - [`EnchantError::RequirementNotMet`],
    ///   [`EnchantError::InsufficientCurrency`],
    ///   [`EnchantError::InsufficientExperience`] when not unlimited
    ///
    /// On error nothing has changed.
    pub fn apply(
        &self,
        action: Action,
        session: &mut Session,
        resources: &mut Resources,
        world: &dyn BlockQuery,
        unlimited: bool,
    ) -> EnchantResult<ActionOutcome> {
        let plan = self.plan(action, session)?;
        if !unlimited {
            Self::check_affordable(&plan, session, resources)?;
        }

        let items = self.resolver.items();
        let mut written = None;
        let mut catalyst_consumed = false;

        if let Some(write) = &plan.write {
            let mut rng = session.seed().roll_rng();
            let target = session.target_mut().ok_or(EnchantError::NoTarget)?;
            let level = roll(
                items.enchantability(&target.item),
                write.floor,
                write.definition.max_level,
                &mut rng,
            );

            if write.provenance != Provenance::Upgrade {
                convert_blank(target, items);
            }
            let id = write.definition.id.clone();
            let level = target.level_of(&id).map_or(level, |current| current.max(level));
            target.enchantments.insert(id.clone(), level);
            written = Some((id, level));

            if write.provenance == Provenance::Transfer {
                let persistent = session.catalyst().is_some_and(|catalyst| {
                    items.traits(&catalyst.item).contains(ItemTraits::PERSISTENT)
                });
                if !persistent {
                    session.consume_catalyst(1);
                    catalyst_consumed = true;
                }
            }
        }

        let charged = if unlimited {
            ActionCost::free()
        } else {
            session.spend_currency(plan.cost.currency);
            resources.experience = resources.experience.saturating_sub(plan.cost.experience);
            plan.cost
        };

        session.advance_seed();
        session.refresh(&self.resolver, world);

        debug!(
            %action,
            enchantment = ?written,
            ?charged,
            catalyst_consumed,
            seed = ?session.seed(),
            "applied enchanting action"
        );
        Ok(ActionOutcome {
            action,
            charged,
            enchantment: written,
            catalyst_consumed,
        })
    }

    /// Validate `action` against the session and price it.
    fn plan(&self, action: Action, session: &Session) -> EnchantResult<Plan<'a>> {
        let target = session.target().ok_or(EnchantError::NoTarget)?;
        if !self.resolver.items().is_enchantable(&target.item) {
            return Err(EnchantError::NotEnchantable(target.item.clone()));
        }
        let slots = session.slots();

        let (Some(slot), Some(expected)) = (action.slot(), action.provenance()) else {
            if slots.has_provenance(Provenance::Transfer)
                || !slots.has_provenance(Provenance::Generate)
            {
                return Err(EnchantError::RerollUnavailable);
            }
            return Ok(Plan {
                cost: reroll_cost(target.enchantments.len()),
                write: None,
            });
        };

        let option = slots.get(slot).ok_or(EnchantError::InvalidSlot(slot))?;
        if option.provenance != expected {
            return Err(EnchantError::WrongProvenance {
                slot,
                expected,
                found: option.provenance,
            });
        }
        let definition = self
            .resolver
            .catalog()
            .lookup(&option.enchantment)
            .ok_or_else(|| EnchantError::UnknownEnchantment(option.enchantment.clone()))?;

        let (cost, floor) = match expected {
            Provenance::Upgrade => {
                let current = target
                    .level_of(&definition.id)
                    .filter(|&level| level == option.level)
                    .ok_or(EnchantError::StaleSlot(slot))?;
                if current >= definition.max_level {
                    return Err(EnchantError::AlreadyMaxed {
                        enchantment: definition.id.clone(),
                        level: current,
                    });
                }
                (upgrade_cost(slot, definition), current + 1)
            }
            Provenance::Transfer => {
                let catalyst = session.catalyst().ok_or(EnchantError::MissingCatalyst)?;
                let offered = catalyst
                    .level_of(&definition.id)
                    .map(|level| level.min(definition.max_level));
                if offered != Some(option.level) {
                    return Err(EnchantError::StaleSlot(slot));
                }
                (enchant_cost(definition), option.level.min(definition.max_level))
            }
            Provenance::Generate => (enchant_cost(definition), option.level),
        };

        Ok(Plan {
            cost,
            write: Some(Enchanting {
                slot,
                definition,
                floor,
                provenance: expected,
            }),
        })
    }

    fn check_affordable(
        plan: &Plan<'_>,
        session: &Session,
        resources: &Resources,
    ) -> EnchantResult<()> {
        if let Some(write) = &plan.write {
            let required = session.slots().requirement(write.slot);
            if resources.experience < required {
                return Err(EnchantError::RequirementNotMet {
                    slot: write.slot,
                    required,
                    available: resources.experience,
                });
            }
        }
        if session.currency() < plan.cost.currency {
            return Err(EnchantError::InsufficientCurrency {
                required: plan.cost.currency,
                available: session.currency(),
            });
        }
        if resources.experience < plan.cost.experience {
            return Err(EnchantError::InsufficientExperience {
                required: plan.cost.experience,
                available: resources.experience,
            });
        }
        Ok(())
    }
}

/// Swap a blank item for its enchanted form, keeping count and enchantments.
fn convert_blank(target: &mut ItemStack, items: &dyn ItemRules) {
    if !items.traits(&target.item).contains(ItemTraits::BLANK) {
        return;
    }
    if let Some(variant) = items.enchanted_variant(&target.item) {
        target.item = variant;
    }
}
