#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, String, i32)>, String, String)| {
    let mut router = rerouter::Router::new();

    for (method, route, item) in data.0 {
        if router.add(&method, &route, [item]).is_err() {
            return;
        }
    }

    let first = router.at(&data.1, &data.2);
    let second = router.at(&data.1, &data.2);
    assert_eq!(first.status(), second.status());
    assert_eq!(first.handlers(), second.handlers());
    assert_eq!(first.params(), second.params());
    assert!(router.cached() <= router.config().cache_capacity);
});
