use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rigcheck_catalog::{Category, Price, Product, ProductId};
use rigcheck_compat::{Evaluator, Selection, Verdict};
use rigcheck_core::{Aggregate, AggregateRoot, BuildId, DomainError};

/// Name given to builds saved without one.
pub const DEFAULT_BUILD_NAME: &str = "Untitled Build";

/// Aggregate root: Build.
///
/// Invariant: at most one product per category slot. Slots only change
/// through [`BuildEvent`]s, so a selection is either fully applied or not
/// applied at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    id: BuildId,
    name: String,
    slots: BTreeMap<Category, Product>,
    created_at: Option<DateTime<Utc>>,
    version: u64,
}

impl Build {
    /// An empty build with the default name.
    pub fn empty(id: BuildId) -> Self {
        Self {
            id,
            name: DEFAULT_BUILD_NAME.to_string(),
            slots: BTreeMap::new(),
            created_at: None,
            version: 0,
        }
    }

    /// Rehydrate from persisted state.
    ///
    /// Products land in the slot of their own category; a later product of
    /// the same category replaces an earlier one. Products without a spec
    /// record are skipped, as they would be when selected.
    pub fn restore(
        id: BuildId,
        name: &str,
        products: impl IntoIterator<Item = Product>,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut build = Self {
            name: normalize_name(name),
            created_at,
            ..Self::empty(id)
        };
        for product in products {
            if product.is_malformed() {
                tracing::warn!(build = %id, product = %product.id, "skipping product without spec record");
                continue;
            }
            build.slots.insert(product.category, product);
        }
        build
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn part(&self, category: Category) -> Option<&Product> {
        self.slots.get(&category)
    }

    pub fn parts(&self) -> impl Iterator<Item = &Product> + '_ {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read-only snapshot for the evaluator and the discovery pipeline.
    pub fn selection(&self) -> Selection<'_> {
        self.slots.iter().map(|(c, p)| (*c, p)).collect()
    }

    pub fn verdict(&self, evaluator: &Evaluator) -> Verdict {
        evaluator.evaluate(&self.selection())
    }

    /// Sum of each occupied slot's best price; unpriced parts add nothing.
    pub fn total_price(&self, preferred_merchant: Option<&str>) -> Price {
        self.slots
            .values()
            .filter_map(|p| p.best_price(preferred_merchant))
            .sum()
    }

    pub fn summary(&self, evaluator: &Evaluator, preferred_merchant: Option<&str>) -> BuildSummary {
        let selection = self.selection();
        BuildSummary {
            total_price: self.total_price(preferred_merchant),
            total_draw_watts: evaluator.power().total_draw(&selection),
            verdict: evaluator.evaluate(&selection),
        }
    }
}

/// Totals shown alongside the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    pub total_price: Price,
    pub total_draw_watts: f64,
    pub verdict: Verdict,
}

impl AggregateRoot for Build {
    type Id = BuildId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SelectPart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectPart {
    pub build_id: BuildId,
    pub category: Category,
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemovePart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePart {
    pub build_id: BuildId,
    pub category: Category,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub build_id: BuildId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildCommand {
    SelectPart(SelectPart),
    RemovePart(RemovePart),
    Rename(Rename),
}

/// Event: PartSelected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSelected {
    pub build_id: BuildId,
    pub category: Category,
    pub product: Product,
    pub replaced: Option<ProductId>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartRejected.
///
/// The offered product was unusable; whatever occupied the slot is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRejected {
    pub build_id: BuildId,
    pub category: Category,
    pub product_id: ProductId,
    pub cleared: Option<ProductId>,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRemoved {
    pub build_id: BuildId,
    pub category: Category,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BuildRenamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRenamed {
    pub build_id: BuildId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildEvent {
    PartSelected(PartSelected),
    PartRejected(PartRejected),
    PartRemoved(PartRemoved),
    BuildRenamed(BuildRenamed),
}

impl BuildEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            BuildEvent::PartSelected(_) => "builds.part.selected",
            BuildEvent::PartRejected(_) => "builds.part.rejected",
            BuildEvent::PartRemoved(_) => "builds.part.removed",
            BuildEvent::BuildRenamed(_) => "builds.build.renamed",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            BuildEvent::PartSelected(e) => e.occurred_at,
            BuildEvent::PartRejected(e) => e.occurred_at,
            BuildEvent::PartRemoved(e) => e.occurred_at,
            BuildEvent::BuildRenamed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Build {
    type Command = BuildCommand;
    type Event = BuildEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            BuildEvent::PartSelected(e) => {
                self.slots.insert(e.category, e.product.clone());
            }
            BuildEvent::PartRejected(e) => {
                self.slots.remove(&e.category);
            }
            BuildEvent::PartRemoved(e) => {
                self.slots.remove(&e.category);
            }
            BuildEvent::BuildRenamed(e) => {
                self.name = e.name.clone();
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            BuildCommand::SelectPart(cmd) => self.handle_select(cmd),
            BuildCommand::RemovePart(cmd) => self.handle_remove(cmd),
            BuildCommand::Rename(cmd) => self.handle_rename(cmd),
        }
    }
}

impl Build {
    fn ensure_build_id(&self, build_id: BuildId) -> Result<(), DomainError> {
        if self.id != build_id {
            return Err(DomainError::invariant("build_id mismatch"));
        }
        Ok(())
    }

    fn occupant(&self, category: Category) -> Option<ProductId> {
        self.slots.get(&category).map(|p| p.id.clone())
    }

    fn handle_select(&self, cmd: &SelectPart) -> Result<Vec<BuildEvent>, DomainError> {
        self.ensure_build_id(cmd.build_id)?;

        if cmd.product.category != cmd.category {
            return Err(DomainError::validation(format!(
                "{} is a {} and cannot occupy the {} slot",
                cmd.product.id, cmd.product.category, cmd.category
            )));
        }

        if cmd.product.is_malformed() {
            tracing::warn!(
                build = %self.id,
                product = %cmd.product.id,
                category = %cmd.category,
                "rejected product without spec record"
            );
            return Ok(vec![BuildEvent::PartRejected(PartRejected {
                build_id: cmd.build_id,
                category: cmd.category,
                product_id: cmd.product.id.clone(),
                cleared: self.occupant(cmd.category),
                reason: DomainError::malformed(format!("{} has no spec record", cmd.product.id)).to_string(),
                occurred_at: cmd.occurred_at,
            })]);
        }

        Ok(vec![BuildEvent::PartSelected(PartSelected {
            build_id: cmd.build_id,
            category: cmd.category,
            product: cmd.product.clone(),
            replaced: self.occupant(cmd.category),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemovePart) -> Result<Vec<BuildEvent>, DomainError> {
        self.ensure_build_id(cmd.build_id)?;

        let Some(product_id) = self.occupant(cmd.category) else {
            return Err(DomainError::not_found());
        };

        Ok(vec![BuildEvent::PartRemoved(PartRemoved {
            build_id: cmd.build_id,
            category: cmd.category,
            product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_rename(&self, cmd: &Rename) -> Result<Vec<BuildEvent>, DomainError> {
        self.ensure_build_id(cmd.build_id)?;

        Ok(vec![BuildEvent::BuildRenamed(BuildRenamed {
            build_id: cmd.build_id,
            name: normalize_name(&cmd.name),
            occurred_at: cmd.occurred_at,
        })])
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_BUILD_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcheck_compat::RuleId;
    use serde_json::json;

    fn test_build_id() -> BuildId {
        BuildId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn cpu(id: &str, socket: &str) -> Product {
        Product::new(id, Category::Cpu, json!({"socket": socket}))
    }

    fn board(id: &str, socket: &str) -> Product {
        Product::new(id, Category::Motherboard, json!({"socket": socket}))
    }

    fn select(build: &Build, product: Product) -> BuildCommand {
        BuildCommand::SelectPart(SelectPart {
            build_id: *build.id(),
            category: product.category,
            product,
            occurred_at: test_time(),
        })
    }

    #[test]
    fn select_part_emits_part_selected_event() {
        let build = Build::empty(test_build_id());
        let events = build.handle(&select(&build, cpu("cpu-1", "AM5"))).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            BuildEvent::PartSelected(e) => {
                assert_eq!(e.category, Category::Cpu);
                assert_eq!(e.product.id.as_str(), "cpu-1");
                assert_eq!(e.replaced, None);
            }
            _ => panic!("Expected PartSelected event"),
        }
        // handle is pure
        assert!(build.is_empty());
        assert_eq!(build.version(), 0);
    }

    #[test]
    fn selecting_again_replaces_the_occupant() {
        let mut build = Build::empty(test_build_id());
        build.execute(&select(&build, cpu("cpu-1", "AM5"))).unwrap();
        let events = build.execute(&select(&build, cpu("cpu-2", "AM4"))).unwrap();

        match &events[0] {
            BuildEvent::PartSelected(e) => assert_eq!(e.replaced, Some(ProductId::new("cpu-1"))),
            _ => panic!("Expected PartSelected event"),
        }
        assert_eq!(build.len(), 1);
        assert_eq!(build.part(Category::Cpu).unwrap().id.as_str(), "cpu-2");
        assert_eq!(build.version(), 2);
    }

    #[test]
    fn select_part_rejects_category_mismatch_without_mutation() {
        let mut build = Build::empty(test_build_id());
        let cmd = BuildCommand::SelectPart(SelectPart {
            build_id: *build.id(),
            category: Category::Motherboard,
            product: cpu("cpu-1", "AM5"),
            occurred_at: test_time(),
        });

        let err = build.execute(&cmd).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for category mismatch"),
        }
        assert!(build.is_empty());
        assert_eq!(build.version(), 0);
    }

    #[test]
    fn malformed_product_is_rejected_and_clears_slot() {
        let mut build = Build::empty(test_build_id());
        build.execute(&select(&build, cpu("cpu-1", "AM5"))).unwrap();

        let events = build
            .execute(&select(&build, Product::without_specs("cpu-broken", Category::Cpu)))
            .unwrap();

        match &events[0] {
            BuildEvent::PartRejected(e) => {
                assert_eq!(e.product_id.as_str(), "cpu-broken");
                assert_eq!(e.cleared, Some(ProductId::new("cpu-1")));
                assert!(e.reason.starts_with("malformed product"));
            }
            _ => panic!("Expected PartRejected event"),
        }
        assert!(build.part(Category::Cpu).is_none());
    }

    #[test]
    fn remove_part_emits_part_removed_event() {
        let mut build = Build::empty(test_build_id());
        build.execute(&select(&build, board("mb-1", "AM5"))).unwrap();

        let cmd = BuildCommand::RemovePart(RemovePart {
            build_id: *build.id(),
            category: Category::Motherboard,
            occurred_at: test_time(),
        });
        let events = build.execute(&cmd).unwrap();

        assert_eq!(events[0].event_type(), "builds.part.removed");
        assert!(build.is_empty());
    }

    #[test]
    fn remove_part_rejects_empty_slot() {
        let build = Build::empty(test_build_id());
        let cmd = BuildCommand::RemovePart(RemovePart {
            build_id: *build.id(),
            category: Category::Gpu,
            occurred_at: test_time(),
        });

        let err = build.handle(&cmd).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn rename_trims_and_defaults_blank_names() {
        let mut build = Build::empty(test_build_id());
        let rename = |name: &str| {
            BuildCommand::Rename(Rename {
                build_id: *build.id(),
                name: name.to_string(),
                occurred_at: test_time(),
            })
        };
        let first = rename("  Stream rig ");
        let blank = rename("   ");

        build.execute(&first).unwrap();
        assert_eq!(build.name(), "Stream rig");
        build.execute(&blank).unwrap();
        assert_eq!(build.name(), DEFAULT_BUILD_NAME);
    }

    #[test]
    fn commands_for_another_build_are_rejected() {
        let build = Build::empty(test_build_id());
        let cmd = BuildCommand::Rename(Rename {
            build_id: test_build_id(),
            name: "x".to_string(),
            occurred_at: test_time(),
        });

        let err = build.handle(&cmd).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for build_id mismatch"),
        }
    }

    #[test]
    fn verdict_and_summary_follow_slots() {
        let mut build = Build::empty(test_build_id());
        build
            .execute(&select(&build, cpu("cpu-1", "AM5").with_price("Ekua", 250.0)))
            .unwrap();
        build
            .execute(&select(&build, board("mb-1", "LGA1700").with_price("Ekua", 180.5)))
            .unwrap();

        let evaluator = Evaluator::default();
        assert_eq!(build.verdict(&evaluator).violated_rules(), vec![RuleId::CpuBoardSocket]);

        let summary = build.summary(&evaluator, None);
        assert_eq!(summary.total_price, Price::from_minor(43_050));
        assert_eq!(summary.total_draw_watts, 120.0);
        assert!(!summary.verdict.is_compatible());
    }

    #[test]
    fn restore_places_products_in_their_own_slots() {
        let id = test_build_id();
        let build = Build::restore(
            id,
            "",
            vec![
                cpu("cpu-1", "AM5"),
                Product::without_specs("ram-broken", Category::Ram),
                board("mb-1", "AM5"),
            ],
            None,
        );

        assert_eq!(build.name(), DEFAULT_BUILD_NAME);
        assert_eq!(build.len(), 2);
        assert!(build.part(Category::Ram).is_none());
        assert_eq!(build.version(), 0);
        assert!(build.verdict(&Evaluator::default()).is_compatible());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Step {
            Select(Category, bool),
            Remove(Category),
        }

        fn arb_category() -> impl Strategy<Value = Category> {
            prop::sample::select(Category::ALL.to_vec())
        }

        fn arb_step() -> impl Strategy<Value = Step> {
            prop_oneof![
                (arb_category(), any::<bool>()).prop_map(|(c, malformed)| Step::Select(c, malformed)),
                arb_category().prop_map(Step::Remove),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: slots mirror the last accepted change per category,
            /// and version counts applied events.
            #[test]
            fn slots_track_last_change(steps in prop::collection::vec(arb_step(), 0..40)) {
                let mut build = Build::empty(BuildId::new());
                let mut expected: BTreeMap<Category, String> = BTreeMap::new();
                let mut applied = 0u64;

                for (i, step) in steps.into_iter().enumerate() {
                    let id = format!("p{i}");
                    let cmd = match &step {
                        Step::Select(c, true) => select(&build, Product::without_specs(id.clone(), *c)),
                        Step::Select(c, false) => select(&build, Product::new(id.clone(), *c, json!({}))),
                        Step::Remove(c) => BuildCommand::RemovePart(RemovePart {
                            build_id: *build.id(),
                            category: *c,
                            occurred_at: Utc::now(),
                        }),
                    };
                    let category = match step {
                        Step::Select(c, _) | Step::Remove(c) => c,
                    };
                    let had = expected.contains_key(&category);

                    match build.execute(&cmd) {
                        Ok(events) => applied += events.len() as u64,
                        Err(err) => {
                            prop_assert_eq!(err, DomainError::NotFound);
                            prop_assert!(!had);
                        }
                    }
                    if matches!(step, Step::Select(_, false)) {
                        expected.insert(category, id);
                    } else {
                        expected.remove(&category);
                    }
                }

                let actual: BTreeMap<Category, String> = build
                    .parts()
                    .map(|p| (p.category, p.id.to_string()))
                    .collect();
                prop_assert_eq!(actual, expected);
                prop_assert_eq!(build.version(), applied);
            }
        }
    }
}
