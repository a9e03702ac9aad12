use std::{env, fs};

use attack_tree_view::{dataset, AttackTree};
use eframe::{run_native, NativeOptions};
use log::{error, info};

mod app;

const APP_NAME: &str = "Software Supply Chain Attack Tree";

/// Loads the tree from the JSON file given as the first argument, falling
/// back to the bundled supply chain dataset.
fn load_tree() -> AttackTree {
    let Some(path) = env::args().nth(1) else {
        return AttackTree::new(&dataset::supply_chain());
    };

    match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| AttackTree::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(tree) => {
            info!("loaded {} nodes from {path}", tree.node_count());
            tree
        }
        Err(err) => {
            error!("failed to load {path}: {err}, using bundled dataset");
            AttackTree::new(&dataset::supply_chain())
        }
    }
}

fn main() {
    env_logger::init();

    let tree = load_tree();
    let native_options = NativeOptions::default();
    run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(app::AttackTreeApp::new(cc, tree)))),
    )
    .unwrap();
}
