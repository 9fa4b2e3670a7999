/// Hand out the next request id from the core's counter.
pub fn next_id(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter += 1;
    id
}
