use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::IVec3;
use runeforge_core::catalog::{
    Catalog, CatalogData, Color, EnchantmentCatalog, EnchantmentDefinition, EnchantmentId, Theme,
    ThemeId,
};
use runeforge_core::config::EngineConfig;
use runeforge_core::item::{ItemProfile, ItemStack, ItemTable};
use runeforge_core::power::{BlockMatcher, PowerBonus, PowerProvider, PowerScanner, LATTICE};
use runeforge_core::resolver::{OptionResolver, Site};
use runeforge_core::seed::Seed;
use runeforge_world::{BlockGrid, BlockId, BlockState, ItemId};

fn block(raw: &str) -> BlockId {
    BlockId::parse(raw).unwrap()
}

fn catalog() -> Catalog {
    let default = ThemeId::parse("runeforge:default").unwrap();
    let abyssal = ThemeId::parse("runeforge:abyssal").unwrap();
    let shelf = PowerProvider::new(BlockMatcher::Blocks([block("bookshelf")].into()), 1);
    let prism = PowerProvider::new(BlockMatcher::Blocks([block("prismarine")].into()), 1)
        .with_bonus(PowerBonus::StateMultiplier {
            property: "depth".to_string(),
        });

    // A catalog of realistic size: 40 definitions across two themes
    let enchantments = (0..40u32)
        .map(|i| {
            let id = EnchantmentId::parse(&format!("runeforge:rune_{i}")).unwrap();
            let definition = EnchantmentDefinition::new(id, 1 + i % 5, 1 + i % 10);
            if i % 4 == 0 {
                definition.themed(abyssal.clone())
            } else {
                definition
            }
        })
        .collect();

    Catalog::new(CatalogData {
        default_theme: default.clone(),
        themes: vec![
            Theme::new(default, Color::rgb(0x80, 0x40, 0xff)).with_provider(shelf),
            Theme::new(abyssal, Color::rgb(0x00, 0x40, 0x80)).with_provider(prism),
        ],
        enchantments,
    })
    .unwrap()
}

fn world() -> BlockGrid {
    let config = EngineConfig::default();
    let mut world = BlockGrid::new();
    world.tag_block(&block("air"), config.transmitter_tag);
    for (i, offset) in LATTICE.iter().enumerate() {
        let state = if i % 3 == 0 {
            BlockState::new(block("prismarine")).with("depth", 2)
        } else {
            BlockState::new(block("bookshelf"))
        };
        world.set_block(*offset, state);
    }
    world
}

fn bench_scan_agnostic(c: &mut Criterion) {
    let catalog = catalog();
    let world = world();
    let config = EngineConfig::default();
    let scanner = PowerScanner::new(&world, &config.transmitter_tag);

    c.bench_function("scan_agnostic", |b| {
        b.iter(|| black_box(scanner.scan_agnostic(black_box(IVec3::ZERO), catalog.themes())))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = catalog();
    let world = world();
    let config = EngineConfig::default();
    let sword = ItemId::parse("diamond_sword").unwrap();
    let mut items = ItemTable::new();
    items.insert(sword.clone(), ItemProfile::enchantable(10));

    let resolver = OptionResolver::new(&catalog, &items, &config);
    let site = Site::new(&world, IVec3::ZERO);
    let target = ItemStack::new(sword, 1)
        .enchanted(EnchantmentId::parse("runeforge:rune_1").unwrap(), 1);

    let mut seed = 0u64;
    c.bench_function("resolve", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(resolver.resolve(Some(&target), None, &site, Seed::new(seed)))
        })
    });
}

criterion_group!(benches, bench_scan_agnostic, bench_resolve);
criterion_main!(benches);
