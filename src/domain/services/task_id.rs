// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use uuid::Uuid;

const TASK_ID_PREFIX: &str = "task_";

/// 分配一个流水线关联ID
///
/// 122 位随机熵，无需外部协调即可避免并发用户之间的冲突。
pub fn allocate_task_id() -> String {
    format!("{}{}", TASK_ID_PREFIX, Uuid::new_v4().simple())
}

/// 使用调用方提供的ID，缺省或空白时分配新ID
pub fn resolve_task_id(provided: Option<&str>) -> String {
    match provided.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => allocate_task_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allocated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| allocate_task_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with(TASK_ID_PREFIX)));
    }

    #[test]
    fn test_resolve_prefers_caller_id() {
        assert_eq!(resolve_task_id(Some("t1")), "t1");
        assert!(resolve_task_id(Some("   ")).starts_with(TASK_ID_PREFIX));
        assert!(resolve_task_id(None).starts_with(TASK_ID_PREFIX));
    }
}
