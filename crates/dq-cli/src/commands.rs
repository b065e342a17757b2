//! Command implementations.
//!
//! Invalid user input never aborts the process: the offending operation is
//! logged and skipped, leaving the stored documents untouched.

use anyhow::{Context, Result, bail};
use tracing::warn;

use dq_apply::{ApplyOutcome, JsonSuiteRecorder, apply_rule_set};
use dq_model::catalog::{
    self, ColumnArity, MULTI_COLUMN_RULES, PARAM_LENGTH, PARAM_MAX_VALUE, PARAM_MIN_VALUE,
    PARAM_OR_EQUAL, PARAM_TYPE, PARAM_VALUE_PAIRS, PARAM_VALUE_SET, ParamKind, RuleDescriptor,
    SINGLE_COLUMN_RULES,
};
use dq_model::{
    ColumnGroup, ParamMap, RuleSetDoc, decode_interface_name, encode_interface_name,
    is_duplicate_interface_name,
};
use dq_parse::{ParserOptions, RawValue, parse, range_is_ordered};
use dq_store::RuleSetStore;

use crate::cli::{AddMultiArgs, AddSingleArgs, ApplyArgs, CreateArgs, ListArgs, RemoveArgs};
use crate::dataset::csv_column_names;

pub fn run_create(store: &RuleSetStore, args: &CreateArgs) -> Result<()> {
    if store.create_empty(&args.set_name)? {
        println!("created rule set {}", args.set_name);
    } else {
        println!("rule set {} already exists", args.set_name);
    }
    Ok(())
}

pub fn run_list(store: &RuleSetStore, args: &ListArgs) -> Result<()> {
    let names = store.list_names()?;
    if names.is_empty() {
        println!("no rule sets defined");
        return Ok(());
    }
    for set_name in names {
        println!("{set_name}");
        if args.rules {
            let doc = store.load(&set_name)?;
            for interface_name in interface_names_in(&doc) {
                println!("  {interface_name}");
            }
        }
    }
    Ok(())
}

pub fn run_add_single(store: &RuleSetStore, args: &AddSingleArgs) -> Result<()> {
    let descriptor = find_rule(SINGLE_COLUMN_RULES, &args.rule)?;
    if args.column.is_empty() {
        warn!("no column selected; nothing added");
        return Ok(());
    }

    let mut parameters = ParamMap::new();
    for (name, kind) in descriptor.stored_parameters() {
        let raw = match name {
            PARAM_TYPE => args.type_name.as_deref(),
            PARAM_LENGTH => args.length.as_deref(),
            PARAM_VALUE_SET => args.values.as_deref(),
            PARAM_MIN_VALUE => args.min.as_deref(),
            PARAM_MAX_VALUE => args.max.as_deref(),
            _ => None,
        };
        let Some(raw) = raw else {
            warn!(parameter = name, "missing parameter; nothing added");
            return Ok(());
        };
        let Some(value) = parse(kind, RawValue::Text(raw), ParserOptions::default()) else {
            warn!(parameter = name, raw, "invalid parameter; nothing added");
            return Ok(());
        };
        parameters.insert(name.to_string(), value);
    }

    // A min/max pair in the wrong order invalidates the whole rule.
    if let (Some(min), Some(max)) = (parameters.get(PARAM_MIN_VALUE), parameters.get(PARAM_MAX_VALUE))
        && !range_is_ordered(min, max)
    {
        warn!("min value exceeds max value; nothing added");
        return Ok(());
    }

    // Single-column uniqueness is enforced here, at interface-name
    // granularity, before the store is touched.
    let interface_name = encode_interface_name(descriptor.display_name, &[args.column.clone()]);
    let existing = existing_interface_names(store, &args.set_name)?;
    if is_duplicate_interface_name(&interface_name, &existing)? {
        warn!(%interface_name, "rule already present; nothing added");
        return Ok(());
    }

    store.add_single_column(&args.set_name, &args.column, descriptor.id, parameters)?;
    println!("added: {interface_name}");
    Ok(())
}

pub fn run_add_multi(store: &RuleSetStore, args: &AddMultiArgs) -> Result<()> {
    let descriptor = find_rule(MULTI_COLUMN_RULES, &args.rule)?;

    let columns = match descriptor.arity {
        ColumnArity::Two => match (args.column_a.as_deref(), args.column_b.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                vec![a.to_string(), b.to_string()]
            }
            _ => {
                warn!("two columns required; nothing added");
                return Ok(());
            }
        },
        ColumnArity::Any | ColumnArity::One => {
            if args.columns.is_empty() {
                warn!("no columns selected; nothing added");
                return Ok(());
            }
            args.columns.clone()
        }
    };

    let or_equal_selection: Vec<String> = if args.or_equal {
        vec![PARAM_OR_EQUAL.to_string()]
    } else {
        Vec::new()
    };
    let mut parameters = ParamMap::new();
    for (name, kind) in descriptor.stored_parameters() {
        let raw = match kind {
            ParamKind::Toggle => RawValue::Selection(&or_equal_selection),
            _ => match name {
                PARAM_VALUE_PAIRS => match args.values.as_deref() {
                    Some(values) => RawValue::Text(values),
                    None => {
                        warn!(parameter = name, "missing parameter; nothing added");
                        return Ok(());
                    }
                },
                _ => {
                    warn!(parameter = name, "missing parameter; nothing added");
                    return Ok(());
                }
            },
        };
        let Some(value) = parse(kind, raw, ParserOptions::default()) else {
            warn!(parameter = name, "invalid parameter; nothing added");
            return Ok(());
        };
        parameters.insert(name.to_string(), value);
    }

    // The store keeps its own exact-content duplicate guard for multi-column
    // rules; the codec-level check only decides what is worth reporting.
    let group = ColumnGroup::new(columns.clone());
    store.add_multi_column(&args.set_name, &group, descriptor.id, parameters)?;
    println!(
        "added: {}",
        encode_interface_name(descriptor.display_name, &columns)
    );
    Ok(())
}

pub fn run_remove(store: &RuleSetStore, args: &RemoveArgs) -> Result<()> {
    let mut removals = Vec::new();
    for interface_name in &args.rules {
        let (rule, columns) = decode_interface_name(interface_name)?;
        removals.push((ColumnGroup::new(columns), rule));
    }
    store.delete_rules(&args.set_name, &removals)?;
    println!("removed {} rule(s) from {}", removals.len(), args.set_name);
    Ok(())
}

pub fn run_prune(store: &RuleSetStore) -> Result<()> {
    let pruned = store.prune_empty_sets()?;
    if pruned.is_empty() {
        println!("no empty rule sets");
    } else {
        for set_name in pruned {
            println!("deleted empty rule set {set_name}");
        }
    }
    Ok(())
}

pub fn run_apply(store: &RuleSetStore, args: &ApplyArgs) -> Result<()> {
    let doc = store.load(&args.set_name)?;
    let dataset_columns = csv_column_names(&args.dataset)
        .with_context(|| format!("failed to read dataset {}", args.dataset.display()))?;

    let mut recorder = JsonSuiteRecorder::new(&args.set_name, store.validations_dir());
    let outcome = apply_rule_set(
        &doc,
        &dataset_columns,
        args.confidence,
        &mut recorder,
        store.validations_dir(),
    )?;
    match outcome {
        ApplyOutcome::Rejected { missing_columns } => {
            println!(
                "rejected: dataset is missing column(s): {}",
                missing_columns.join(", ")
            );
        }
        ApplyOutcome::Applied { artifact, calls } => {
            println!("applied {calls} rule(s); suite written to {}", artifact.display());
        }
    }
    Ok(())
}

/// Interface names of every rule currently stored in a set, or none when the
/// set does not exist yet.
fn existing_interface_names(store: &RuleSetStore, set_name: &str) -> Result<Vec<String>> {
    if !store.set_path(set_name).exists() {
        return Ok(Vec::new());
    }
    Ok(interface_names_in(&store.load(set_name)?))
}

fn interface_names_in(doc: &RuleSetDoc) -> Vec<String> {
    let mut names = Vec::new();
    for (key, instances) in &doc.expectations {
        let group = ColumnGroup::from_key(key);
        for instance in instances {
            names.push(encode_interface_name(
                catalog::describe(instance.rule).display_name,
                group.columns(),
            ));
        }
    }
    names
}

fn find_rule(rules: &'static [RuleDescriptor], display_name: &str) -> Result<&'static RuleDescriptor> {
    match rules
        .iter()
        .find(|descriptor| descriptor.display_name == display_name)
    {
        Some(descriptor) => Ok(descriptor),
        None => {
            let known: Vec<&str> = rules
                .iter()
                .map(|descriptor| descriptor.display_name)
                .collect();
            bail!("unknown rule {display_name:?}; expected one of: {}", known.join(", "));
        }
    }
}
