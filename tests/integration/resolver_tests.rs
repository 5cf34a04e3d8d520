use super::common::{chain, cycle, ids, mixed_org, CountingSource};
use metadeps::DependencyResolver;
use pretty_assertions::assert_eq;

async fn primed(source: CountingSource) -> DependencyResolver<CountingSource> {
    let mut resolver = DependencyResolver::new(source);
    resolver.describe().await.unwrap();
    resolver
}

#[tokio::test]
async fn chain_references_are_transitive() {
    let mut resolver = primed(CountingSource::new(chain())).await;
    let found = resolver.references("ApexClass", "A", true).await.unwrap();
    assert_eq!(ids(&found), vec!["B", "C"]);
}

#[tokio::test]
async fn chain_usage_seeds_the_start() {
    let mut resolver = primed(CountingSource::new(chain())).await;
    let found = resolver.usage("ApexClass", "C", true).await.unwrap();
    assert_eq!(ids(&found), vec!["C", "B", "A"]);
}

#[tokio::test]
async fn direct_lookups_stop_after_one_hop() {
    let mut resolver = primed(CountingSource::new(chain())).await;
    assert_eq!(
        ids(&resolver.references("ApexClass", "A", false).await.unwrap()),
        vec!["B"]
    );
    assert_eq!(
        ids(&resolver.usage("ApexClass", "C", false).await.unwrap()),
        vec!["B"]
    );
}

#[tokio::test]
async fn every_reference_shows_up_as_usage() {
    let mut resolver = primed(CountingSource::new(mixed_org())).await;
    let referenced = resolver.references("ApexPage", "P", true).await.unwrap();

    for target in &referenced {
        let users = resolver
            .usage(&target.component_type, &target.id, true)
            .await
            .unwrap();
        assert!(
            ids(&users).contains(&"P"),
            "usage of {} should include the page",
            target
        );
    }
}

#[tokio::test]
async fn cycle_terminates() {
    let mut resolver = primed(CountingSource::new(cycle())).await;
    let found = resolver.references("ApexClass", "A", true).await.unwrap();
    assert_eq!(ids(&found), vec!["B", "A"]);
}

#[tokio::test]
async fn shared_target_appears_once() {
    let mut resolver = primed(CountingSource::new(mixed_org())).await;
    let found = resolver.references("ApexPage", "P", true).await.unwrap();
    assert_eq!(ids(&found), vec!["A1", "A2", "F"]);
}

#[tokio::test]
async fn breadth_is_fetched_in_one_batch_per_pass() {
    let source = CountingSource::new(mixed_org());
    let mut resolver = primed(source.clone()).await;
    resolver.references("ApexPage", "P", true).await.unwrap();

    assert_eq!(
        source.batches(),
        vec![
            vec!["P".to_string()],
            vec!["A1".to_string(), "A2".to_string()],
            vec!["F".to_string()],
        ]
    );
}

#[tokio::test]
async fn cached_answers_need_no_queries() {
    let source = CountingSource::new(chain());
    let mut resolver = primed(source.clone()).await;

    let first = resolver.references("ApexClass", "A", true).await.unwrap();
    let queries = source.batches().len();
    let second = resolver.references("ApexClass", "A", true).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.batches().len(), queries);
}

#[tokio::test]
async fn leaf_is_not_queried_twice() {
    let source = CountingSource::new(chain());
    let mut resolver = primed(source.clone()).await;

    assert!(resolver
        .references("ApexClass", "C", false)
        .await
        .unwrap()
        .is_empty());
    resolver.references("ApexClass", "C", false).await.unwrap();
    assert_eq!(source.batches().len(), 1);
}

#[tokio::test]
async fn unknown_target_types_are_dropped() {
    let mut resolver = primed(CountingSource::new(mixed_org())).await;
    let found = resolver.references("ApexClass", "A1", false).await.unwrap();
    assert_eq!(ids(&found), vec!["F"]);
    assert!(found.iter().all(|c| c.component_type != "StandardEntity"));
}

#[tokio::test]
async fn unprimed_resolver_knows_no_types() {
    let mut resolver = DependencyResolver::new(CountingSource::new(chain()));
    assert!(resolver
        .references("ApexClass", "A", true)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn listing_and_catalog_are_fetched_once() {
    let source = CountingSource::new(mixed_org());
    let mut resolver = DependencyResolver::new(source.clone());

    resolver.describe().await.unwrap();
    resolver.describe().await.unwrap();
    let first = resolver.list("ApexClass").await.unwrap();
    let second = resolver.list("ApexClass").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.describes(), 1);
    assert_eq!(source.lists(), 1);
    let names: Vec<_> = first.iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["AccountController", "AccountHelper"]);
}

#[tokio::test]
async fn missing_seed_yields_only_dependents() {
    let mut resolver = primed(CountingSource::new(chain())).await;
    let found = resolver.usage("ApexClass", "Z", true).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn find_by_name_resolves_ids() {
    let mut resolver = primed(CountingSource::new(chain())).await;
    let bravo = resolver
        .find_by_name("ApexClass", "Bravo")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bravo.id, "B");
    assert!(resolver
        .find_by_name("ApexClass", "Delta")
        .await
        .unwrap()
        .is_none());
}
