use gemres::DependencyList;
use gemres::specdb::package::*;
use gemres_test_utils::*;

fn full_names(specs: &[&PackageSpec]) -> Vec<String> {
	specs.iter().map(|s| s.full_name()).collect()
}

#[test]
fn dependency_order_chain() {
	let _ = env_logger::builder().is_test(true).try_init();
	let d = quick_spec("d", "1.1").unwrap();
	let c = quick_spec_with("c", "1.1", &[("d", ">= 1.1")]).unwrap();
	let b = quick_spec_with("b", "1.1", &[("c", ">= 1.1")]).unwrap();
	let a = quick_spec_with("a", "1.1", &[("b", ">= 1.1")]).unwrap();

	let mut list = DependencyList::new(false);
	list.add_all([&a, &b, &c, &d]);

	assert!(list.ok());
	assert_eq!(full_names(&list.dependency_order()), ["d-1.1", "c-1.1", "b-1.1", "a-1.1"]);

	/* Insertion order doesn't change a fully determined order */
	let mut reversed = DependencyList::new(false);
	reversed.add_all([&d, &c, &b, &a]);
	assert_eq!(full_names(&reversed.dependency_order()), ["d-1.1", "c-1.1", "b-1.1", "a-1.1"]);
}

#[test]
fn dependency_order_tolerates_cycles() {
	let _ = env_logger::builder().is_test(true).try_init();
	let a = quick_spec_with("a", "1.0", &[("c", "")]).unwrap();
	let b = quick_spec_with("b", "1.0", &[("a", "")]).unwrap();
	let c = quick_spec_with("c", "1.0", &[("b", "")]).unwrap();

	let mut list = DependencyList::new(false);
	list.add_all([&a, &b, &c]);

	assert!(list.ok());
	assert!(list.has_cycle());
	let order = list.dependency_order();
	assert_eq!(order.len(), 3);
	assert_eq!(full_names(&order), ["a-1.0", "b-1.0", "c-1.0"]);
}

#[test]
fn dependency_order_mutual_pair_with_dependent() {
	let a = quick_spec_with("a", "1.0", &[("b", "")]).unwrap();
	let b = quick_spec_with("b", "1.0", &[("a", "")]).unwrap();
	let app = quick_spec_with("app", "1.0", &[("a", ""), ("b", "")]).unwrap();

	let mut list = DependencyList::new(false);
	list.add_all([&app, &a, &b]);
	assert_eq!(full_names(&list.dependency_order()), ["a-1.0", "b-1.0", "app-1.0"]);
}

#[test]
fn dependency_list_ok_detects_missing() {
	let a = quick_spec("a", "1.1").unwrap();
	let b = quick_spec_with("b", "1.0", &[("a", ">= 1.1")]).unwrap();

	let mut list = DependencyList::new(false);
	list.add(&b);
	assert!(!list.ok());
	assert_eq!(list.why_not_ok().keys().collect::<Vec<_>>(), ["b-1.0"]);

	list.add(&a);
	assert!(list.ok());
}

#[test]
fn dependency_list_removal() {
	let a1 = quick_spec("a", "1.0").unwrap();
	let a2 = quick_spec("a", "2.0").unwrap();
	let b = quick_spec_with("b", "1.0", &[("a", ">= 1.0")]).unwrap();
	let c = quick_spec_with("c", "1.0", &[("a", "> 1.5, < 3")]).unwrap();

	let mut list = DependencyList::new(false);
	list.add_all([&a1, &a2, &b, &c]);

	assert!(list.ok_to_remove("a-1.0"));
	assert!(!list.ok_to_remove("a-2.0"));
	assert!(list.ok_to_remove("c-1.0"));

	assert_eq!(list.remove_by_name("c-1.0").map(PackageSpec::full_name), Some("c-1.0".to_string()));
	assert!(list.ok_to_remove("a-2.0"));
	assert!(list.ok());
}

#[test]
fn dependency_list_from_pool() {
	let pool = fixture_pool().unwrap();
	let list = DependencyList::from_pool(&pool, false);
	assert_eq!(list.len(), pool.len());
	assert!(list.ok());

	let development = DependencyList::from_pool(&pool, true);
	assert!(development.ok());

	let order = list.dependency_order();
	let position = |full_name: &str| order.iter().position(|s| s.full_name() == full_name);
	assert!(position("rack-2.2.8") < position("rack-protection-3.1.0"));
	assert!(position("rack-protection-3.1.0") < position("sinatra-3.1.0"));
	assert!(position("racc-1.7.1") < position("nokogiri-1.15.4-java"));
}
