//! The availability decision procedure.

use stockcheck_core::ProductId;
use stockcheck_inventory::{InventoryFact, InventoryLookup, LookupError};

use crate::messages::ReasonCode;
use crate::outcome::{ChildShortfall, Outcome};
use crate::request::{ChildRequest, StockRequest};

/// Decide whether `request` can be satisfied from the inventory behind `lookup`.
///
/// Pure apart from the lookups themselves: the same request against the same
/// inventory snapshot always yields the same outcome.
///
/// The primary product must exist for either path; a grouped listing that has
/// been removed is not found, whatever its children say.
///
/// A lookup failure for the primary product is returned as `Err`. For grouped
/// children it is reported as a "not found" line instead, so one bad child
/// never hides the state of the others.
pub fn evaluate<L>(request: &StockRequest, lookup: &L) -> Result<Outcome, LookupError>
where
    L: InventoryLookup + ?Sized,
{
    match request {
        StockRequest::Single {
            product_id,
            requested_qty,
            ..
        } => evaluate_single(*product_id, *requested_qty, lookup),
        StockRequest::Grouped {
            product_id,
            children,
        } => match find_primary(*product_id, lookup)? {
            Some(_) => Ok(evaluate_grouped(children, lookup)),
            None => Ok(Outcome::ProductNotFound {
                product_id: *product_id,
            }),
        },
    }
}

fn find_primary<L>(product_id: ProductId, lookup: &L) -> Result<Option<InventoryFact>, LookupError>
where
    L: InventoryLookup + ?Sized,
{
    Ok(lookup.lookup(product_id)?.filter(|fact| fact.exists))
}

fn evaluate_single<L>(product_id: ProductId, requested_qty: i64, lookup: &L) -> Result<Outcome, LookupError>
where
    L: InventoryLookup + ?Sized,
{
    let Some(fact) = find_primary(product_id, lookup)? else {
        return Ok(Outcome::ProductNotFound { product_id });
    };

    // The explicit stock status wins over the tracked count: an untracked
    // product marked out of stock is out of stock.
    if !fact.in_stock {
        return Ok(Outcome::OutOfStock);
    }
    if !fact.tracks_stock {
        return Ok(Outcome::Available);
    }
    if requested_qty < 1 {
        return Ok(Outcome::Invalid(ReasonCode::EnterValidNumber));
    }

    let available_qty = tracked_qty(&fact)?;
    if covers(available_qty, requested_qty) {
        Ok(Outcome::Available)
    } else {
        Ok(Outcome::LimitedStock { available_qty })
    }
}

fn evaluate_grouped<L>(children: &[ChildRequest], lookup: &L) -> Outcome
where
    L: InventoryLookup + ?Sized,
{
    let mut considered = 0usize;
    let mut shortfalls = Vec::new();

    for child in children.iter().filter(|c| c.requested_qty > 0) {
        considered += 1;

        let fact = match lookup.lookup(child.product_id) {
            Ok(Some(fact)) if fact.exists => fact,
            _ => {
                shortfalls.push(ChildShortfall::not_found(child.product_id));
                continue;
            }
        };

        if !fact.in_stock {
            shortfalls.push(ChildShortfall::out_of_stock(child.product_id, &fact.display_name));
            continue;
        }
        if !fact.tracks_stock {
            continue;
        }

        match tracked_qty(&fact) {
            Ok(available_qty) if covers(available_qty, child.requested_qty) => {}
            Ok(available_qty) => shortfalls.push(ChildShortfall::limited(
                child.product_id,
                &fact.display_name,
                available_qty,
            )),
            Err(_) => shortfalls.push(ChildShortfall::not_found(child.product_id)),
        }
    }

    if considered == 0 {
        return Outcome::Invalid(ReasonCode::GroupProductNotValid);
    }
    if shortfalls.is_empty() {
        Outcome::Available
    } else {
        Outcome::GroupShortfall(shortfalls)
    }
}

fn tracked_qty(fact: &InventoryFact) -> Result<u64, LookupError> {
    fact.available_qty.ok_or_else(|| LookupError::Corrupt {
        product_id: fact.product_id,
        reason: "stock is tracked but no quantity was reported".to_string(),
    })
}

fn covers(available_qty: u64, requested_qty: i64) -> bool {
    u64::try_from(requested_qty).is_ok_and(|requested| available_qty >= requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ShortfallReason;
    use stockcheck_inventory::InMemoryCatalog;

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn catalog(facts: impl IntoIterator<Item = InventoryFact>) -> InMemoryCatalog {
        InMemoryCatalog::from_facts(facts).unwrap()
    }

    /// Grouped listing under id 1; it carries no stock of its own.
    fn set_listing() -> InventoryFact {
        InventoryFact::untracked(pid(1), "Set")
    }

    /// Lookup that fails for every id in `broken`.
    struct FlakyLookup {
        inner: InMemoryCatalog,
        broken: Vec<ProductId>,
    }

    impl InventoryLookup for FlakyLookup {
        fn lookup(&self, product_id: ProductId) -> Result<Option<InventoryFact>, LookupError> {
            if self.broken.contains(&product_id) {
                return Err(LookupError::Unavailable("connection reset".to_string()));
            }
            self.inner.lookup(product_id)
        }
    }

    /// Lookup that answers every id with the same fact, skipping catalog validation.
    struct FixedLookup(InventoryFact);

    impl InventoryLookup for FixedLookup {
        fn lookup(&self, _product_id: ProductId) -> Result<Option<InventoryFact>, LookupError> {
            Ok(Some(self.0.clone()))
        }
    }

    #[test]
    fn tracked_product_with_enough_stock_is_available() {
        let inv = catalog([InventoryFact::tracked(pid(1), "Mug", 5)]);
        let outcome = evaluate(&StockRequest::simple(pid(1), 3), &inv).unwrap();
        assert_eq!(outcome, Outcome::Available);
    }

    #[test]
    fn exact_stock_is_enough() {
        let inv = catalog([InventoryFact::tracked(pid(1), "Mug", 3)]);
        assert_eq!(evaluate(&StockRequest::simple(pid(1), 3), &inv).unwrap(), Outcome::Available);
    }

    #[test]
    fn tracked_product_with_too_little_stock_reports_the_count() {
        let inv = catalog([InventoryFact::tracked(pid(1), "Mug", 2)]);
        let outcome = evaluate(&StockRequest::simple(pid(1), 5), &inv).unwrap();
        assert_eq!(outcome, Outcome::LimitedStock { available_qty: 2 });
    }

    #[test]
    fn out_of_stock_flag_wins_regardless_of_tracking() {
        let inv = catalog([
            InventoryFact::tracked(pid(1), "Mug", 50).out_of_stock(),
            InventoryFact::untracked(pid(2), "Poster").out_of_stock(),
        ]);
        assert_eq!(evaluate(&StockRequest::simple(pid(1), 1), &inv).unwrap(), Outcome::OutOfStock);
        assert_eq!(evaluate(&StockRequest::simple(pid(2), 1), &inv).unwrap(), Outcome::OutOfStock);
        assert_eq!(evaluate(&StockRequest::simple(pid(2), 0), &inv).unwrap(), Outcome::OutOfStock);
    }

    #[test]
    fn untracked_product_is_always_available() {
        let inv = catalog([InventoryFact::untracked(pid(9), "Ebook")]);
        let outcome = evaluate(&StockRequest::variable(pid(9), 1_000_000), &inv).unwrap();
        assert_eq!(outcome, Outcome::Available);
    }

    #[test]
    fn zero_quantity_on_tracked_product_asks_for_a_valid_number() {
        let inv = catalog([InventoryFact::tracked(pid(1), "Mug", 5)]);
        let outcome = evaluate(&StockRequest::simple(pid(1), 0), &inv).unwrap();
        assert_eq!(outcome, Outcome::Invalid(ReasonCode::EnterValidNumber));
    }

    #[test]
    fn unknown_primary_product_is_not_found() {
        let inv = catalog([InventoryFact::missing(pid(4))]);
        assert_eq!(
            evaluate(&StockRequest::simple(pid(3), 1), &inv).unwrap(),
            Outcome::ProductNotFound { product_id: pid(3) }
        );
        assert_eq!(
            evaluate(&StockRequest::simple(pid(4), 1), &inv).unwrap(),
            Outcome::ProductNotFound { product_id: pid(4) }
        );
    }

    #[test]
    fn primary_lookup_failure_propagates() {
        let inv = FlakyLookup {
            inner: catalog([]),
            broken: vec![pid(1)],
        };
        let err = evaluate(&StockRequest::simple(pid(1), 1), &inv).unwrap_err();
        assert!(matches!(err, LookupError::Unavailable(_)));
    }

    #[test]
    fn tracked_fact_without_quantity_is_corrupt() {
        let mut fact = InventoryFact::tracked(pid(1), "Mug", 1);
        fact.available_qty = None;

        let err = evaluate(&StockRequest::simple(pid(1), 1), &FixedLookup(fact)).unwrap_err();
        assert!(matches!(err, LookupError::Corrupt { .. }));
    }

    #[test]
    fn grouped_reports_only_failing_children() {
        let inv = catalog([
            set_listing(),
            InventoryFact::tracked(pid(10), "A", 5),
            InventoryFact::tracked(pid(11), "B", 1),
        ]);
        let req = StockRequest::grouped(
            pid(1),
            vec![ChildRequest::new(pid(10), 2), ChildRequest::new(pid(11), 10)],
        );

        match evaluate(&req, &inv).unwrap() {
            Outcome::GroupShortfall(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].product_id, pid(11));
                assert_eq!(lines[0].reason, ShortfallReason::Limited { available_qty: 1 });
                assert_eq!(lines[0].message, "B: Sorry, we only have 1 units in stock.");
            }
            other => panic!("Expected GroupShortfall, got {other:?}"),
        }
    }

    #[test]
    fn grouped_with_all_zero_quantities_is_invalid() {
        let inv = catalog([set_listing(), InventoryFact::tracked(pid(10), "A", 5)]);
        let req = StockRequest::grouped(
            pid(1),
            vec![ChildRequest::new(pid(10), 0), ChildRequest::new(pid(11), 0)],
        );
        assert_eq!(
            evaluate(&req, &inv).unwrap(),
            Outcome::Invalid(ReasonCode::GroupProductNotValid)
        );

        let empty = StockRequest::grouped(pid(1), vec![]);
        assert_eq!(
            evaluate(&empty, &inv).unwrap(),
            Outcome::Invalid(ReasonCode::GroupProductNotValid)
        );
    }

    #[test]
    fn grouped_collects_every_violation_in_input_order() {
        let inv = FlakyLookup {
            inner: catalog([
                set_listing(),
                InventoryFact::tracked(pid(10), "Kettle", 1),
                InventoryFact::untracked(pid(11), "Tea").out_of_stock(),
                InventoryFact::untracked(pid(12), "Spoon"),
            ]),
            broken: vec![pid(14)],
        };
        let req = StockRequest::grouped(
            pid(1),
            vec![
                ChildRequest::new(pid(13), 1),
                ChildRequest::new(pid(12), 500),
                ChildRequest::new(pid(11), 1),
                ChildRequest::new(pid(99), 0),
                ChildRequest::new(pid(10), 2),
                ChildRequest::new(pid(14), 1),
            ],
        );

        let Outcome::GroupShortfall(lines) = evaluate(&req, &inv).unwrap() else {
            panic!("Expected GroupShortfall");
        };
        let messages: Vec<&str> = lines.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Product with ID 13 not found.",
                "Tea: Sorry, this item is out of stock.",
                "Kettle: Sorry, we only have 1 units in stock.",
                "Product with ID 14 not found.",
            ]
        );
    }

    #[test]
    fn grouped_with_every_child_covered_is_available() {
        let inv = catalog([
            set_listing(),
            InventoryFact::tracked(pid(10), "A", 2),
            InventoryFact::untracked(pid(11), "B"),
        ]);
        let req = StockRequest::grouped(
            pid(1),
            vec![ChildRequest::new(pid(10), 2), ChildRequest::new(pid(11), 40)],
        );
        assert_eq!(evaluate(&req, &inv).unwrap(), Outcome::Available);
    }

    #[test]
    fn grouped_listing_that_no_longer_exists_is_not_found() {
        let inv = catalog([
            InventoryFact::missing(pid(2)),
            InventoryFact::tracked(pid(10), "A", 5),
        ]);
        let children = vec![ChildRequest::new(pid(10), 1)];

        assert_eq!(
            evaluate(&StockRequest::grouped(pid(999), children.clone()), &inv).unwrap(),
            Outcome::ProductNotFound { product_id: pid(999) }
        );
        assert_eq!(
            evaluate(&StockRequest::grouped(pid(2), children), &inv).unwrap(),
            Outcome::ProductNotFound { product_id: pid(2) }
        );
    }

    #[test]
    fn grouped_listing_lookup_failure_propagates() {
        let inv = FlakyLookup {
            inner: catalog([InventoryFact::tracked(pid(10), "A", 5)]),
            broken: vec![pid(1)],
        };
        let req = StockRequest::grouped(pid(1), vec![ChildRequest::new(pid(10), 1)]);
        assert!(matches!(evaluate(&req, &inv).unwrap_err(), LookupError::Unavailable(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: a tracked, in-stock product is available iff stock covers a positive request.
            #[test]
            fn tracked_availability_matches_stock(available in 0u64..1_000, requested in -5i64..1_000) {
                let inv = catalog([InventoryFact::tracked(pid(1), "P", available)]);
                let outcome = evaluate(&StockRequest::simple(pid(1), requested), &inv).unwrap();

                let expected = if requested < 1 {
                    Outcome::Invalid(ReasonCode::EnterValidNumber)
                } else if available >= requested as u64 {
                    Outcome::Available
                } else {
                    Outcome::LimitedStock { available_qty: available }
                };
                prop_assert_eq!(outcome, expected);
            }

            /// Property: untracked in-stock products accept any positive quantity.
            #[test]
            fn untracked_accepts_any_positive_quantity(requested in 1i64..=i64::MAX) {
                let inv = catalog([InventoryFact::untracked(pid(1), "P")]);
                prop_assert_eq!(
                    evaluate(&StockRequest::simple(pid(1), requested), &inv).unwrap(),
                    Outcome::Available
                );
            }

            /// Property: an unknown primary id is never found, whatever the quantity.
            #[test]
            fn unknown_primary_is_not_found(raw_id in 2u64..10_000, requested in any::<i64>()) {
                let inv = catalog([InventoryFact::tracked(pid(1), "P", 10)]);
                prop_assert_eq!(
                    evaluate(&StockRequest::simple(pid(raw_id), requested), &inv).unwrap(),
                    Outcome::ProductNotFound { product_id: pid(raw_id) }
                );
            }

            /// Property: shortfall lines follow input order and skip non-positive quantities.
            #[test]
            fn grouped_shortfalls_preserve_order(
                lines in prop::collection::vec((0u64..5, -2i64..6), 1..12)
            ) {
                // Child i has id i+1 and `stock` tracked units.
                let facts = lines
                    .iter()
                    .enumerate()
                    .map(|(i, (stock, _))| InventoryFact::tracked(pid(i as u64 + 1), format!("C{}", i + 1), *stock))
                    .chain([InventoryFact::untracked(pid(1_000), "Set")]);
                let inv = catalog(facts);
                let children: Vec<ChildRequest> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, (_, qty))| ChildRequest::new(pid(i as u64 + 1), *qty))
                    .collect();

                let expected_ids: Vec<ProductId> = children
                    .iter()
                    .zip(lines.iter())
                    .filter(|(c, (stock, _))| c.requested_qty > 0 && (*stock as i64) < c.requested_qty)
                    .map(|(c, _)| c.product_id)
                    .collect();
                let any_positive = children.iter().any(|c| c.requested_qty > 0);

                let outcome = evaluate(&StockRequest::grouped(pid(1_000), children), &inv).unwrap();
                match outcome {
                    Outcome::Invalid(reason) => {
                        prop_assert!(!any_positive);
                        prop_assert_eq!(reason, ReasonCode::GroupProductNotValid);
                    }
                    Outcome::Available => prop_assert!(any_positive && expected_ids.is_empty()),
                    Outcome::GroupShortfall(found) => {
                        let ids: Vec<ProductId> = found.iter().map(|s| s.product_id).collect();
                        prop_assert_eq!(ids, expected_ids);
                    }
                    other => prop_assert!(false, "unexpected outcome {:?}", other),
                }
            }

            /// Property: evaluation is idempotent over an unchanged snapshot.
            #[test]
            fn evaluation_is_idempotent(available in 0u64..20, requested in -2i64..30, tracked in any::<bool>()) {
                let fact = if tracked {
                    InventoryFact::tracked(pid(1), "P", available)
                } else {
                    InventoryFact::untracked(pid(1), "P")
                };
                let inv = catalog([fact]);
                let req = StockRequest::simple(pid(1), requested);

                let first = evaluate(&req, &inv).unwrap();
                let second = evaluate(&req, &inv).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
