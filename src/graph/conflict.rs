use std::collections::HashMap;

use crate::core::pack::Pack;
use crate::core::version::is_compatible;
use crate::graph::{Conflict, ConflictKind, ConflictSeverity, PackIndex};

/// Runs the three scans (version mismatch, circular dependency, missing
/// dependency) and concatenates their findings under one id counter.
pub fn detect_conflicts(packs: &[Pack]) -> Vec<Conflict> {
    let index = PackIndex::new(packs);
    let mut conflicts = Vec::new();
    let mut counter = 0usize;

    scan_version_mismatches(packs, &index, &mut conflicts, &mut counter);
    scan_cycles(packs, &index, &mut conflicts, &mut counter);
    scan_missing(packs, &index, &mut conflicts, &mut counter);

    conflicts
}

fn next_conflict_id(counter: &mut usize) -> String {
    let id = format!("conflict-{counter}");
    *counter += 1;
    id
}

fn scan_version_mismatches(
    packs: &[Pack],
    index: &PackIndex,
    out: &mut Vec<Conflict>,
    counter: &mut usize,
) {
    for pack in packs {
        for dep in pack.required_deps() {
            let Some(constraint) = dep.version.as_deref() else {
                continue;
            };
            let Some(target) = index.resolve(&dep.pack_id) else {
                continue;
            };
            if is_compatible(&target.version, constraint) {
                continue;
            }
            out.push(Conflict {
                id: next_conflict_id(counter),
                kind: ConflictKind::VersionMismatch,
                severity: ConflictSeverity::Error,
                source_pack: pack.id.clone(),
                target_pack: Some(target.id.clone()),
                message: format!(
                    "{} requires {} {} but version {} is installed",
                    pack.name, target.name, constraint, target.version
                ),
                details: Some(format!(
                    "required: {}, installed: {}",
                    constraint, target.version
                )),
                resolution: Some(format!(
                    "Upgrade {} to a version matching {} or relax the constraint in {}",
                    target.name, constraint, pack.name
                )),
            });
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}

fn scan_cycles(packs: &[Pack], index: &PackIndex, out: &mut Vec<Conflict>, counter: &mut usize) {
    let mut targets: HashMap<&str, Vec<&Pack>> = HashMap::new();
    for pack in packs {
        let resolved = pack
            .all_deps()
            .filter_map(|dep| index.resolve(&dep.pack_id))
            .collect();
        targets.insert(pack.slug.as_str(), resolved);
    }

    let mut state: HashMap<&str, VisitState> = HashMap::new();
    let mut stack: Vec<&Pack> = Vec::new();
    for pack in packs {
        if state.contains_key(pack.slug.as_str()) {
            continue;
        }
        visit_pack(pack, &targets, &mut state, &mut stack, out, counter);
    }
}

fn visit_pack<'a>(
    pack: &'a Pack,
    targets: &HashMap<&'a str, Vec<&'a Pack>>,
    state: &mut HashMap<&'a str, VisitState>,
    stack: &mut Vec<&'a Pack>,
    out: &mut Vec<Conflict>,
    counter: &mut usize,
) {
    if let Some(existing) = state.get(pack.slug.as_str()) {
        // Only back-edges into the current call stack count as cycles;
        // a fully visited pack reached again is a diamond, not a cycle.
        if *existing == VisitState::Visiting {
            if let Some(pos) = stack.iter().position(|entry| entry.slug == pack.slug) {
                out.push(cycle_conflict(&stack[pos..], counter));
            }
        }
        return;
    }

    state.insert(pack.slug.as_str(), VisitState::Visiting);
    stack.push(pack);
    if let Some(next) = targets.get(pack.slug.as_str()) {
        for &target in next {
            visit_pack(target, targets, state, stack, out, counter);
        }
    }
    stack.pop();
    state.insert(pack.slug.as_str(), VisitState::Visited);
}

fn cycle_conflict(cycle: &[&Pack], counter: &mut usize) -> Conflict {
    let mut names: Vec<&str> = cycle.iter().map(|pack| pack.name.as_str()).collect();
    names.push(cycle[0].name.as_str());
    let rendered = names.join(" -> ");

    let target = cycle.get(1).unwrap_or(&cycle[0]);
    Conflict {
        id: next_conflict_id(counter),
        kind: ConflictKind::CircularDependency,
        severity: ConflictSeverity::Critical,
        source_pack: cycle[0].id.clone(),
        target_pack: Some(target.id.clone()),
        message: format!("Circular dependency detected: {rendered}"),
        details: Some(rendered),
        resolution: Some(
            "Break the cycle by removing one dependency or marking it optional".to_string(),
        ),
    }
}

fn scan_missing(packs: &[Pack], index: &PackIndex, out: &mut Vec<Conflict>, counter: &mut usize) {
    for pack in packs {
        for dep in pack.required_deps() {
            if index.resolve(&dep.pack_id).is_some() {
                continue;
            }
            out.push(Conflict {
                id: next_conflict_id(counter),
                kind: ConflictKind::MissingDependency,
                severity: ConflictSeverity::Error,
                source_pack: pack.id.clone(),
                target_pack: None,
                message: format!(
                    "{} requires '{}' which is not in the catalogue",
                    pack.name, dep.pack_id
                ),
                details: dep
                    .version
                    .as_ref()
                    .map(|constraint| format!("constraint: {constraint}")),
                resolution: Some(format!(
                    "Add a pack matching '{}' or remove the dependency from {}",
                    dep.pack_id, pack.name
                )),
            });
        }
    }
}
