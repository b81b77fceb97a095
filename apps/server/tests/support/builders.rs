use serde_json::{json, Map, Value};

/// Builder for solution object graphs
pub struct SolutionBuilder {
    fields: Map<String, Value>,
    tags: Vec<String>,
    catalog_ids: Vec<String>,
    revisions: Vec<Value>,
}

impl SolutionBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut fields = Map::new();
        fields.insert("solutionId".into(), json!(id));
        fields.insert("name".into(), json!(id));
        fields.insert("active".into(), json!(true));
        Self {
            fields,
            tags: Vec::new(),
            catalog_ids: Vec::new(),
            revisions: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.field("name", name)
    }

    pub fn active(self, active: bool) -> Self {
        self.field("active", active)
    }

    pub fn user(self, user_id: &str) -> Self {
        self.field("userId", user_id)
    }

    pub fn model_type(self, code: Option<&str>) -> Self {
        self.field("modelTypeCode", code.map_or(Value::Null, |c| json!(c)))
    }

    pub fn modified(self, at: &str) -> Self {
        self.field("modified", at)
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn catalogs(mut self, ids: &[&str]) -> Self {
        self.catalog_ids = ids.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn revision(mut self, revision: RevisionBuilder) -> Self {
        let solution_id = self.fields.get("solutionId").cloned().unwrap_or(Value::Null);
        self.revisions.push(revision.build_for(solution_id));
        self
    }

    pub fn build(self) -> Value {
        let mut fields = self.fields;
        fields.insert("tags".into(), json!(self.tags));
        fields.insert("catalogIds".into(), json!(self.catalog_ids));
        fields.insert("revisions".into(), Value::Array(self.revisions));
        Value::Object(fields)
    }
}

/// Builder for solution revisions
pub struct RevisionBuilder {
    fields: Map<String, Value>,
    descriptions: Vec<Value>,
}

impl RevisionBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("revisionId".into(), json!(id.into()));
        fields.insert("version".into(), json!("1.0"));
        Self {
            fields,
            descriptions: Vec::new(),
        }
    }

    pub fn authors(mut self, authors: &str) -> Self {
        self.fields.insert("authors".into(), json!(authors));
        self
    }

    pub fn publisher(mut self, publisher: &str) -> Self {
        self.fields.insert("publisher".into(), json!(publisher));
        self
    }

    pub fn access(mut self, code: &str) -> Self {
        self.fields.insert("accessTypeCode".into(), json!(code));
        self
    }

    pub fn modified(mut self, at: &str) -> Self {
        self.fields.insert("modified".into(), json!(at));
        self
    }

    pub fn description(mut self, catalog_id: &str, text: &str) -> Self {
        self.descriptions.push(json!({
            "catalogId": catalog_id,
            "description": text,
        }));
        self
    }

    fn build_for(self, solution_id: Value) -> Value {
        let mut fields = self.fields;
        let revision_id = fields.get("revisionId").cloned().unwrap_or(Value::Null);
        fields.insert("solutionId".into(), solution_id);
        let descriptions = self
            .descriptions
            .into_iter()
            .map(|mut d| {
                if let Some(obj) = d.as_object_mut() {
                    obj.insert("revisionId".into(), revision_id.clone());
                }
                d
            })
            .collect();
        fields.insert("descriptions".into(), Value::Array(descriptions));
        Value::Object(fields)
    }
}

/// Minimal user record
pub fn user(id: &str, first_name: &str, active: bool) -> Value {
    json!({
        "userId": id,
        "firstName": first_name,
        "loginName": id,
        "active": active,
        "roleIds": [],
    })
}

/// Minimal task record with a numeric id
pub fn task(id: i64, status: &str) -> Value {
    json!({
        "taskId": id,
        "taskCode": "OB",
        "name": format!("task-{id}"),
        "statusCode": status,
    })
}
