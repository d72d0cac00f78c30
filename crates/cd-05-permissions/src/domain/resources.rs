//! Resource cascades
//!
//! The resources a permission is checked against, broadest first.

use shared_types::{DataType, DiscoveryScope, ResourceScope};

/// Resources a permission is checked on: node, then project, then dataset,
/// then the data type itself.
///
/// Without a project only the node is asked about.
pub fn scope_cascade(scope: &DiscoveryScope, data_type: DataType) -> Vec<ResourceScope> {
    let mut cascade = vec![ResourceScope::Everything];

    let Some(project) = &scope.project else {
        return cascade;
    };
    cascade.push(ResourceScope::Project {
        project: project.clone(),
    });

    let dataset = scope.dataset.as_ref().filter(|_| scope.is_dataset_level());
    if let Some(dataset) = dataset {
        cascade.push(ResourceScope::Dataset {
            project: project.clone(),
            dataset: dataset.clone(),
        });
    }

    cascade.push(ResourceScope::DataType {
        project: project.clone(),
        dataset: dataset.cloned(),
        data_type,
    });
    cascade
}
