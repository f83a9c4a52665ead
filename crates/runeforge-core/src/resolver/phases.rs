//! The four fill phases.

use tracing::trace;

use super::{OptionResolver, Site};
use crate::item::ItemStack;
use crate::seed::Seed;
use crate::shuffle::weighted_shuffle;
use crate::slots::{EnchantmentOption, Provenance, SlotArray, SLOT_COUNT};

/// Phase 1: the target's non-curse enchantments as Upgrade options.
pub(super) fn upgrade(resolver: &OptionResolver<'_>, target: &ItemStack, slots: &mut SlotArray) {
    let catalog = resolver.catalog();
    let mut owned: Vec<_> = target
        .enchantments
        .iter()
        .filter_map(|(id, &level)| {
            let Some(definition) = catalog.lookup(id) else {
                trace!(enchantment = %id, "skipping unknown enchantment on target");
                return None;
            };
            (!definition.is_curse()).then_some((id, level, level >= definition.max_level))
        })
        .collect();

    // Stable: map order is kept within each group
    owned.sort_by_key(|&(_, _, maxed)| maxed);

    for (id, level, _) in owned.into_iter().take(SLOT_COUNT) {
        slots.push(EnchantmentOption::new(id.clone(), level, Provenance::Upgrade));
    }
    trace!(filled = slots.len(), "upgrade phase");
}

/// Phase 2: catalyst enchantments override weaker Upgrade options in place.
///
/// Catalyst levels above the definition's max count as the max.
pub(super) fn transfer_override(
    resolver: &OptionResolver<'_>,
    target: &ItemStack,
    catalyst: &ItemStack,
    slots: &mut SlotArray,
) {
    let catalog = resolver.catalog();
    for (id, &level) in &catalyst.enchantments {
        let Some(definition) = catalog.lookup(id) else {
            continue;
        };
        if !resolver.applies_to(definition, target) {
            continue;
        }
        let level = level.min(definition.max_level);
        let weaker = slots.populated().find_map(|(i, option)| {
            (option.enchantment == *id
                && option.provenance == Provenance::Upgrade
                && option.level < level)
                .then_some(i)
        });
        if let Some(index) = weaker {
            trace!(enchantment = %id, slot = index, level, "catalyst overrides upgrade");
            slots.replace(
                index,
                EnchantmentOption::new(id.clone(), level, Provenance::Transfer),
            );
        }
    }
}

/// Phase 3: remaining catalyst enchantments take empty slots.
///
/// An enchantment the target already holds at the same or a higher level is
/// skipped, since transferring it would change nothing.
pub(super) fn transfer_append(
    resolver: &OptionResolver<'_>,
    target: &ItemStack,
    catalyst: &ItemStack,
    slots: &mut SlotArray,
) {
    let catalog = resolver.catalog();
    for (id, &level) in &catalyst.enchantments {
        if slots.is_full() {
            break;
        }
        if slots.contains(id) {
            continue;
        }
        let Some(definition) = catalog.lookup(id) else {
            trace!(enchantment = %id, "skipping unknown enchantment on catalyst");
            continue;
        };
        let level = level.min(definition.max_level);
        if target.level_of(id).is_some_and(|owned| owned >= level) {
            trace!(enchantment = %id, level, "target already holds catalyst level");
            continue;
        }
        if resolver.applies_to(definition, target) {
            slots.push(EnchantmentOption::new(id.clone(), level, Provenance::Transfer));
        }
    }
    trace!(filled = slots.len(), "transfer phases");
}

/// Phase 4: gated definitions, shuffled by rarity, fill the rest at level 1.
///
/// Enchantments the target already carries are skipped along with those
/// already in a slot, so an applied option never overwrites an existing
/// level.
pub(super) fn generate(
    resolver: &OptionResolver<'_>,
    target: &ItemStack,
    catalyst_present: bool,
    site: &Site<'_>,
    seed: Seed,
    slots: &mut SlotArray,
) {
    let candidates =
        resolver
            .themes(site)
            .applicable_definitions(&target.item, catalyst_present, site.location);
    let candidate_count = candidates.len();

    let mut rng = seed.shuffle_rng();
    let ranked = weighted_shuffle(
        candidates,
        |definition| f64::from(definition.weight),
        &mut rng,
    );

    for definition in ranked {
        if slots.is_full() {
            break;
        }
        if slots.contains(&definition.id) || target.level_of(&definition.id).is_some() {
            continue;
        }
        slots.push(EnchantmentOption::new(
            definition.id.clone(),
            1,
            Provenance::Generate,
        ));
    }
    trace!(candidates = candidate_count, filled = slots.len(), "generate phase");
}
