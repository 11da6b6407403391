//! 菜单树构建
//!
//! 输入是按 `level, sort, id` 排好的 菜单 × 权限 行。输出顺序沿用首次出现的
//! 顺序，同级排序由查询决定。子行可以先于父行出现：父节点的槽位先占住，
//! 等它自己的行到达时再填入。

use std::collections::{HashMap, HashSet};

use shared::models::{MenuAction, MenuNode, MenuRow};

#[derive(Default)]
struct Slot {
    node: Option<MenuNode>,
    children: Vec<usize>,
    seen_privileges: HashSet<i64>,
}

/// 扁平行 → 导航森林
///
/// 祖先链到不了根 (`parent_id == 0`) 的节点连同子树丢弃。空输入得到空森林。
pub fn build_menu_tree(rows: &[MenuRow]) -> Vec<MenuNode> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for row in rows {
        let idx = slot_for(&mut slots, &mut index, row.id);

        if slots[idx].node.is_none() {
            slots[idx].node = Some(node_from(row));
            if row.parent_id == 0 {
                roots.push(idx);
            } else {
                let parent = slot_for(&mut slots, &mut index, row.parent_id);
                slots[parent].children.push(idx);
            }
        }

        if let (Some(privilege_id), Some(action)) = (row.privilege_id, row.action) {
            let slot = &mut slots[idx];
            if slot.seen_privileges.insert(privilege_id)
                && let Some(node) = slot.node.as_mut()
            {
                node.actions.push(MenuAction {
                    privilege_id,
                    action,
                });
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|idx| assemble(&mut slots, idx))
        .collect()
}

fn slot_for(slots: &mut Vec<Slot>, index: &mut HashMap<i64, usize>, id: i64) -> usize {
    *index.entry(id).or_insert_with(|| {
        slots.push(Slot::default());
        slots.len() - 1
    })
}

fn node_from(row: &MenuRow) -> MenuNode {
    MenuNode {
        id: row.id,
        name: row.name.clone(),
        path: row.path.clone(),
        icon: row.icon.clone(),
        level: row.level,
        parent_id: row.parent_id,
        sort: row.sort,
        is_group: row.is_group,
        actions: Vec::new(),
        children: Vec::new(),
    }
}

/// 取出槽位里的节点并挂上子节点
///
/// 每个槽位只取一次，父子环也因此断开。
fn assemble(slots: &mut [Slot], idx: usize) -> Option<MenuNode> {
    let mut node = slots[idx].node.take()?;
    let children = std::mem::take(&mut slots[idx].children);
    node.children = children
        .into_iter()
        .filter_map(|child| assemble(slots, child))
        .collect();
    Some(node)
}
