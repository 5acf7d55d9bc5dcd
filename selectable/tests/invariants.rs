use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use selectable::prelude::*;

const ITEMS: usize = 10;
const STEPS: usize = 400;

struct World {
    engine: Engine,
    singles: Vec<HostId>,
    multis: Vec<HostId>,
    items: Vec<ItemId>,
}

impl World {
    fn new(rng: &mut StdRng) -> Self {
        let mut engine = Engine::new();
        let singles: Vec<HostId> = (0..2).map(|_| engine.single_host()).collect();
        let multis: Vec<HostId> = (0..3).map(|_| engine.multi_host()).collect();
        let items: Vec<ItemId> = (0..ITEMS).map(|_| engine.create_item()).collect();
        for &host in singles.iter().chain(&multis) {
            for &item in &items {
                if rng.random_bool(0.5) {
                    engine.add(host, item).unwrap();
                }
            }
        }
        Self {
            engine,
            singles,
            multis,
            items,
        }
    }

    fn any_host(&self, rng: &mut StdRng) -> HostId {
        let index = rng.random_range(0..self.singles.len() + self.multis.len());
        if index < self.singles.len() {
            self.singles[index]
        } else {
            self.multis[index - self.singles.len()]
        }
    }

    fn any_multi(&self, rng: &mut StdRng) -> HostId {
        self.multis[rng.random_range(0..self.multis.len())]
    }

    fn any_item(&self, rng: &mut StdRng) -> ItemId {
        self.items[rng.random_range(0..self.items.len())]
    }

    fn step(&mut self, rng: &mut StdRng) -> String {
        let host = self.any_host(rng);
        let multi = self.any_multi(rng);
        let item = self.any_item(rng);
        let engine = &mut self.engine;
        match rng.random_range(0..13) {
            0 => {
                engine.select_item(item).unwrap();
                format!("select_item({item})")
            }
            1 => {
                engine.deselect_item(item).unwrap();
                format!("deselect_item({item})")
            }
            2 => {
                engine.toggle_item(item).unwrap();
                format!("toggle_item({item})")
            }
            3 => {
                engine.select(host, item).unwrap();
                format!("select({host}, {item})")
            }
            4 => {
                engine.deselect(host, item).unwrap();
                format!("deselect({host}, {item})")
            }
            5 => {
                engine.toggle(host, item).unwrap();
                format!("toggle({host}, {item})")
            }
            6 => {
                engine.select_all(multi).unwrap();
                format!("select_all({multi})")
            }
            7 => {
                engine.deselect_all(multi).unwrap();
                format!("deselect_all({multi})")
            }
            8 => {
                engine.toggle_select_all(multi).unwrap();
                format!("toggle_select_all({multi})")
            }
            9 => {
                let index = rng.random_range(0..=engine.total_count(host).unwrap());
                engine.insert_at(host, index, item).unwrap();
                format!("insert_at({host}, {index}, {item})")
            }
            10 | 11 => {
                engine.remove(host, item).unwrap();
                format!("remove({host}, {item})")
            }
            _ => {
                let members: Vec<ItemId> = self
                    .items
                    .iter()
                    .copied()
                    .filter(|_| rng.random_bool(0.4))
                    .collect();
                engine.reset(host, members.clone()).unwrap();
                format!("reset({host}, {members:?})")
            }
        }
    }

    fn check(&self, history: &[String]) {
        if let Err(violation) = self.engine.check_invariants() {
            panic!("{violation} after:\n{}", history.join("\n"));
        }
        for &host in &self.singles {
            assert!(self.engine.selected_count(host).unwrap() <= 1);
        }
        for &host in &self.multis {
            let ids = self.engine.selected_ids(host).unwrap();
            assert_eq!(self.engine.selected_count(host).unwrap(), ids.len());
        }
    }
}

#[test]
fn test_invariants_hold_under_random_operations() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new(&mut rng);
        let mut history = Vec::new();
        world.check(&history);

        for _ in 0..STEPS {
            history.push(world.step(&mut rng));
            world.check(&history);
        }
    }
}

#[test]
fn test_invariants_hold_with_silent_options() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut world = World::new(&mut rng);
    let quiet = [
        SelectOptions::new().silent(),
        SelectOptions::new().silent_locally(),
        SelectOptions::new().silent_reselect(),
    ];

    for _ in 0..STEPS {
        let opts = quiet[rng.random_range(0..quiet.len())];
        let host = world.any_host(&mut rng);
        let item = world.any_item(&mut rng);
        match rng.random_range(0..3) {
            0 => world.engine.select_with(host, item, opts).unwrap(),
            1 => world.engine.deselect_item_with(item, opts).unwrap(),
            _ => world.engine.toggle_item_with(item, opts).unwrap(),
        }
        world.engine.check_invariants().unwrap();
    }
}
