mod common;

use trienode::{inspect::NodeStatsCollector, ChildMap};

struct TrieNode(ChildMap<TrieNode, u32>);

fn insert(root: &mut TrieNode, word: &str, value: u32) {
    let mut node = root;
    for byte in word.as_bytes() {
        if !node.0.contains(byte).unwrap() {
            node.0.set(byte, TrieNode(ChildMap::new())).unwrap();
        }
        node = node.0.get_mut(byte).unwrap();
    }
    node.0.set_value(value);
}

fn collect_stats(node: &TrieNode, collector: &mut NodeStatsCollector) {
    collector.add(&node.0);
    for child in node.0.values() {
        collect_stats(child, collector);
    }
}

const WORDS: &[&str] = &[
    "a", "an", "and", "ant", "any", "bat", "bath", "batch", "be", "bee", "been", "zebra",
];

#[test]
#[cfg(not(miri))]
fn test_memory_usage() {
    use common::{get_profiler, test_heap};

    let prof = get_profiler(file!());

    test_heap(&prof, |stats| {
        dhat::assert_eq!(stats.curr_blocks, 0);
        dhat::assert_eq!(stats.curr_bytes, 0);
    });

    {
        let mut root = TrieNode(ChildMap::new());
        for (value, word) in WORDS.iter().enumerate() {
            insert(&mut root, word, value as u32);
        }

        let mut collector = NodeStatsCollector::new();
        collect_stats(&root, &mut collector);
        let node_stats = collector.finish();

        assert_eq!(node_stats.num_values(), WORDS.len());

        test_heap(&prof, |stats| {
            // Every allocation is the key or child array of some node
            dhat::assert_eq!(stats.curr_bytes, node_stats.heap_bytes());
        });
    }

    test_heap(&prof, |stats| {
        dhat::assert_eq!(stats.curr_blocks, 0);
        dhat::assert_eq!(stats.curr_bytes, 0);
    });
}
