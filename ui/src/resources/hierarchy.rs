//! Form rules for hierarchy nodes. Unlike the flat records, whether a
//! parent is acceptable depends on the rest of the tree, so the parent
//! field is checked against a [`Forest`].

use payloads::requests::{CreateHierarchyNode, UpdateHierarchyNode};
use payloads::responses::HierarchyNode;
use payloads::{LevelType, NodeId, SubjectId};

use crate::forms::{
    FieldError, FieldSpec, FormSchema, FormValues, ValidationErrors,
};
use crate::tree::Forest;

pub const LEVEL_OPTIONS: &[(&str, &str)] = &[
    ("standard", "Standard"),
    ("class", "Class"),
    ("chapter", "Chapter"),
    ("topic", "Topic"),
];

/// Field of the parent dropdown. Its options come from the forest, so it
/// is not part of [`node_schema`].
pub const PARENT_FIELD: &str = "parent_id";

pub fn node_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldSpec::text("level_name", "Name")
            .required("Name is required")
            .max_len(100, "Name must be at most 100 characters")
            .placeholder("e.g. Class 6, Fractions"),
        FieldSpec::select("level_type", "Level", LEVEL_OPTIONS)
            .required("Level is required"),
        FieldSpec::number("order_index", "Order")
            .required("Order is required")
            .integer("Order must be a whole number")
            .min(0, "Order cannot be negative"),
        FieldSpec::checkbox("is_active", "Active").default_bool(true),
    ])
}

/// Values for a new node under `parent` (or a new root).
pub fn new_node_values(forest: &Forest, parent: Option<&NodeId>) -> FormValues {
    node_schema()
        .defaults()
        .with_text(
            PARENT_FIELD,
            parent.map(ToString::to_string).unwrap_or_default(),
        )
        .with_text("level_type", forest.suggested_level(parent).as_str())
        .with_text("order_index", forest.next_order_index(parent).to_string())
}

pub fn node_values(node: &HierarchyNode) -> FormValues {
    FormValues::new()
        .with_text("level_name", &node.level_name)
        .with_text("level_type", node.level_type.as_str())
        .with_text(
            PARENT_FIELD,
            node.parent_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        )
        .with_text("order_index", node.order_index.to_string())
        .with_bool("is_active", node.is_active)
}

/// The chosen parent, rejecting the node itself, its descendants and
/// nodes that have since disappeared.
fn chosen_parent(
    values: &FormValues,
    editing: Option<&NodeId>,
    forest: &Forest,
) -> Result<Option<NodeId>, FieldError> {
    let Some(parent) = values.opt_text(PARENT_FIELD).map(NodeId) else {
        return Ok(None);
    };
    if let Some(editing) = editing {
        if &parent == editing {
            return Err(FieldError::field(
                PARENT_FIELD,
                "A node cannot be its own parent",
            ));
        }
        if forest.descendants(editing).contains(&parent) {
            return Err(FieldError::field(
                PARENT_FIELD,
                "A node cannot be moved under one of its own descendants",
            ));
        }
    }
    if forest.get(&parent).is_none() {
        return Err(FieldError::field(
            PARENT_FIELD,
            "The selected parent no longer exists",
        ));
    }
    Ok(Some(parent))
}

fn level_type(values: &FormValues) -> Result<LevelType, FieldError> {
    LevelType::parse(values.text("level_type"))
        .ok_or_else(|| FieldError::field("level_type", "Level is required"))
}

/// Field rules and the parent check together, so every problem shows at
/// once.
fn checked(
    values: &FormValues,
    editing: Option<&NodeId>,
    forest: &Forest,
) -> Result<(FormValues, Option<NodeId>), ValidationErrors> {
    let schema = node_schema();
    let values = schema.normalize(values);
    let mut errors = match schema.validate(&values) {
        Ok(()) => Vec::new(),
        Err(ValidationErrors(errors)) => errors,
    };
    let parent = match chosen_parent(&values, editing, forest) {
        Ok(parent) => parent,
        Err(error) => {
            errors.push(error);
            None
        }
    };
    if errors.is_empty() {
        Ok((values, parent))
    } else {
        Err(ValidationErrors(errors))
    }
}

pub fn prepare_create(
    values: &FormValues,
    subject_id: &SubjectId,
    forest: &Forest,
) -> Result<CreateHierarchyNode, ValidationErrors> {
    let (values, parent_id) = checked(values, None, forest)?;
    Ok(CreateHierarchyNode {
        subject_id: subject_id.clone(),
        parent_id,
        level_name: values.text("level_name").to_string(),
        level_type: level_type(&values)?,
        order_index: values.number("order_index")?,
        is_active: values.bool("is_active"),
    })
}

pub fn prepare_update(
    values: &FormValues,
    node_id: &NodeId,
    forest: &Forest,
) -> Result<UpdateHierarchyNode, ValidationErrors> {
    let (values, parent_id) = checked(values, Some(node_id), forest)?;
    Ok(UpdateHierarchyNode {
        parent_id,
        level_name: values.text("level_name").to_string(),
        level_type: level_type(&values)?,
        order_index: values.number("order_index")?,
        is_active: values.bool("is_active"),
    })
}

/// Consequence line of the delete confirmation. The backend deletes the
/// whole subtree.
pub fn delete_warning(forest: &Forest, node: &HierarchyNode) -> String {
    match forest.descendants(&node.id).len() {
        0 => format!("\"{}\" will be deleted.", node.level_name),
        1 => format!(
            "\"{}\" and 1 nested level below it will be deleted.",
            node.level_name
        ),
        n => format!(
            "\"{}\" and {n} nested levels below it will be deleted.",
            node.level_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, level: LevelType) -> HierarchyNode {
        HierarchyNode {
            id: NodeId::from(id),
            subject_id: SubjectId::from("s1"),
            level_name: format!("Level {id}"),
            level_type: level,
            parent_id: parent.map(NodeId::from),
            order_index: 0,
            is_active: true,
            children: Vec::new(),
        }
    }

    fn forest() -> Forest {
        Forest::from_nodes(&[
            node("c6", None, LevelType::Class),
            node("frac", Some("c6"), LevelType::Chapter),
            node("halves", Some("frac"), LevelType::Topic),
        ])
    }

    #[test]
    fn child_of_class_defaults_to_chapter() {
        let forest = forest();
        let c6 = NodeId::from("c6");
        let values = new_node_values(&forest, Some(&c6))
            .with_text("level_name", "Decimals");
        let request =
            prepare_create(&values, &SubjectId::from("s1"), &forest).unwrap();
        assert_eq!(request.level_type, LevelType::Chapter);
        assert_eq!(request.parent_id, Some(c6));
        assert_eq!(request.order_index, 1);

        // The suggestion can be overridden
        let values = values.with_text("level_type", "topic");
        let request =
            prepare_create(&values, &SubjectId::from("s1"), &forest).unwrap();
        assert_eq!(request.level_type, LevelType::Topic);
    }

    #[test]
    fn root_nodes_have_no_parent() {
        let forest = Forest::default();
        let values =
            new_node_values(&forest, None).with_text("level_name", "Class 6");
        let request =
            prepare_create(&values, &SubjectId::from("s1"), &forest).unwrap();
        assert_eq!(request.parent_id, None);
        assert_eq!(request.level_type, LevelType::Standard);
        assert_eq!(request.order_index, 0);
    }

    #[test]
    fn node_cannot_be_its_own_parent_or_below_its_descendant() {
        let forest = forest();
        let frac = node("frac", Some("c6"), LevelType::Chapter);

        let values = node_values(&frac).with_text(PARENT_FIELD, "frac");
        let errors =
            prepare_update(&values, &frac.id, &forest).unwrap_err();
        assert_eq!(
            errors.for_field(PARENT_FIELD),
            Some("A node cannot be its own parent")
        );

        let values = node_values(&frac).with_text(PARENT_FIELD, "halves");
        let errors =
            prepare_update(&values, &frac.id, &forest).unwrap_err();
        assert_eq!(
            errors.for_field(PARENT_FIELD),
            Some("A node cannot be moved under one of its own descendants")
        );
    }

    #[test]
    fn unchanged_edit_submits_the_same_node() {
        let forest = forest();
        let frac = node("frac", Some("c6"), LevelType::Chapter);
        let request =
            prepare_update(&node_values(&frac), &frac.id, &forest).unwrap();
        assert_eq!(
            request,
            UpdateHierarchyNode {
                parent_id: frac.parent_id.clone(),
                level_name: frac.level_name.clone(),
                level_type: frac.level_type,
                order_index: frac.order_index,
                is_active: frac.is_active,
            }
        );
    }

    #[test]
    fn editing_a_nested_node_keeps_its_parent() {
        let payload = r#"[{
            "id": "c6", "subjectId": "s1", "levelName": "Class 6",
            "levelType": "class", "orderIndex": 0, "isActive": true,
            "children": [{
                "id": "frac", "subjectId": "s1", "levelName": "Fractions",
                "levelType": "chapter", "orderIndex": 0, "isActive": true
            }]
        }]"#;
        let nodes: Vec<HierarchyNode> = serde_json::from_str(payload).unwrap();
        let forest = Forest::from_nodes(&nodes);
        let frac = forest.get(&NodeId::from("frac")).unwrap().clone();

        let request =
            prepare_update(&node_values(&frac), &frac.id, &forest).unwrap();
        assert_eq!(request.parent_id, Some(NodeId::from("c6")));
        assert_eq!(request.level_name, "Fractions");
    }

    #[test]
    fn all_problems_are_reported_together() {
        let forest = forest();
        let frac = node("frac", Some("c6"), LevelType::Chapter);
        let values = node_values(&frac)
            .with_text("level_name", " ")
            .with_text(PARENT_FIELD, "frac");
        let errors = prepare_update(&values, &frac.id, &forest).unwrap_err();
        assert_eq!(errors.0.len(), 2);
    }

    #[test]
    fn delete_warning_counts_the_subtree() {
        let forest = forest();
        let c6 = node("c6", None, LevelType::Class);
        assert_eq!(
            delete_warning(&forest, &c6),
            "\"Level c6\" and 2 nested levels below it will be deleted."
        );
    }
}
