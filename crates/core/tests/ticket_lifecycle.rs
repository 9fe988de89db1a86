//! Store and query engine working together over a real data file.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use ticketdesk_core::testing::fixtures;
use ticketdesk_core::{
    run_query, JsonFileTicketStore, Priority, PriorityFilter, Ticket, TicketQuery, TicketStore,
};

fn write_seed(dir: &TempDir, tickets: &[Ticket]) -> PathBuf {
    let path = dir.path().join("data.json");
    fs::write(&path, serde_json::to_string_pretty(tickets).unwrap()).unwrap();
    path
}

fn query_store(store: &dyn TicketStore, query: &TicketQuery) -> ticketdesk_core::TicketPage {
    run_query(&store.list().unwrap(), query)
}

#[test]
fn test_paging_through_45_tickets() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileTicketStore::open(write_seed(&dir, &fixtures::tickets(45))).unwrap();

    let first = query_store(&store, &TicketQuery::new());
    assert_eq!(first.tickets.len(), 20);
    assert_eq!(first.pages_number, 3);
    assert_eq!(first.overall_results, 45);

    let last = query_store(&store, &TicketQuery::new().with_page(3));
    assert_eq!(last.tickets.len(), 5);
}

#[test]
fn test_priority_change_is_visible_to_next_query() {
    let dir = TempDir::new().unwrap();
    let mut t1 = fixtures::ticket("t1", "VPN drops every hour");
    t1.priority = Priority::Low;
    let store =
        JsonFileTicketStore::open(write_seed(&dir, &[t1, fixtures::ticket("t2", "Other")]))
            .unwrap();

    store.set_priority("t1", Priority::High).unwrap();

    let page = query_store(&store, &TicketQuery::new());
    let t1 = page.tickets.iter().find(|t| t.id == "t1").unwrap();
    assert_eq!(t1.priority, Priority::High);

    let high = query_store(&store, &TicketQuery::new().with_priority(Priority::High));
    assert_eq!(high.overall_results, 1);
    let low = query_store(&store, &TicketQuery::new().with_priority(Priority::Low));
    assert_eq!(low.overall_results, 0);
}

#[test]
fn test_search_and_filter_invariants_hold_on_seed_data() {
    let dir = TempDir::new().unwrap();
    let tickets: Vec<Ticket> = fixtures::tickets(70)
        .into_iter()
        .enumerate()
        .map(|(i, mut t)| {
            t.priority = Priority::ALL[i % 3];
            t
        })
        .collect();
    let store = JsonFileTicketStore::open(write_seed(&dir, &tickets)).unwrap();

    for search in ["", "corvid", "NUMBER 1", "example.com", "label3", "nothing-like-this"] {
        for priority in ["all", "low", "none", "high"] {
            let query = TicketQuery::from_params(Some(search), Some(priority), None);
            let page = query_store(&store, &query);

            let needle = search.to_lowercase();
            let expected: Vec<&Ticket> = tickets
                .iter()
                .filter(|t| query.priority.matches(t))
                .filter(|t| t.search_haystack().contains(&needle))
                .collect();

            assert_eq!(page.overall_results, expected.len());
            assert_eq!(page.pages_number, expected.len().div_ceil(20));
            assert!(page.tickets.len() <= 20);
            if let PriorityFilter::Only(p) = query.priority {
                assert!(page.tickets.iter().all(|t| t.priority == p));
            }
            assert!(page
                .tickets
                .iter()
                .all(|t| t.search_haystack().contains(&needle)));
        }
    }
}
