//! Field allowlists for every searchable entity.

use crate::db::search::schema::{
    EntitySchema, FieldDef, FieldKind::*, Relation, RelationKind,
};

pub mod solution {
    use super::*;

    pub static SOLUTION_ID: FieldDef = FieldDef::new("solutionId", "solution_id", Id);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static USER_ID: FieldDef = FieldDef::new("userId", "user_id", Id);
    pub static SOURCE_ID: FieldDef = FieldDef::new("sourceId", "source_id", Id);
    pub static MODEL_TYPE_CODE: FieldDef = FieldDef::new("modelTypeCode", "model_type_code", Code);
    pub static TOOLKIT_TYPE_CODE: FieldDef =
        FieldDef::new("toolkitTypeCode", "toolkit_type_code", Code);
    pub static ORIGIN: FieldDef = FieldDef::new("origin", "origin", Text);
    pub static ACTIVE: FieldDef = FieldDef::new("active", "active", Bool);
    pub static FEATURED: FieldDef = FieldDef::new("featured", "featured", Bool);
    pub static METADATA: FieldDef = FieldDef::new("metadata", "metadata", Text);
    pub static VIEW_COUNT: FieldDef = FieldDef::new("viewCount", "view_count", Integer);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static TAGS: Relation = Relation {
        name: "tags",
        table: "c_sol_tag_map",
        parent_key: "solution_id",
        foreign_key: "solution_id",
        kind: RelationKind::ValueSet { value_column: "tag" },
    };

    pub static CATALOGS: Relation = Relation {
        name: "catalogIds",
        table: "c_cat_sol_map",
        parent_key: "solution_id",
        foreign_key: "solution_id",
        kind: RelationKind::ValueSet {
            value_column: "catalog_id",
        },
    };

    pub static REVISIONS: Relation = Relation {
        name: "revisions",
        table: "c_solution_rev",
        parent_key: "solution_id",
        foreign_key: "solution_id",
        kind: RelationKind::Rows {
            schema: &super::revision::SCHEMA,
        },
    };

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "solution",
        table: "c_solution",
        id: &SOLUTION_ID,
        fields: &[
            &SOLUTION_ID,
            &NAME,
            &USER_ID,
            &SOURCE_ID,
            &MODEL_TYPE_CODE,
            &TOOLKIT_TYPE_CODE,
            &ORIGIN,
            &ACTIVE,
            &FEATURED,
            &METADATA,
            &VIEW_COUNT,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[&TAGS, &CATALOGS, &REVISIONS],
    };
}

pub mod revision {
    use super::*;

    pub static REVISION_ID: FieldDef = FieldDef::new("revisionId", "revision_id", Id);
    pub static SOLUTION_ID: FieldDef = FieldDef::new("solutionId", "solution_id", Id);
    pub static VERSION: FieldDef = FieldDef::new("version", "version", Text);
    pub static USER_ID: FieldDef = FieldDef::new("userId", "user_id", Id);
    pub static AUTHORS: FieldDef = FieldDef::new("authors", "authors", Text);
    pub static PUBLISHER: FieldDef = FieldDef::new("publisher", "publisher", Text);
    pub static ACCESS_TYPE_CODE: FieldDef =
        FieldDef::new("accessTypeCode", "access_type_code", Code);
    pub static VERIFIED_LICENSE: FieldDef =
        FieldDef::new("verifiedLicense", "verified_license", Code);
    pub static VERIFIED_VULNERABILITY: FieldDef =
        FieldDef::new("verifiedVulnerability", "verified_vulnerability", Code);
    pub static ORIGIN: FieldDef = FieldDef::new("origin", "origin", Text);
    pub static ONBOARDED: FieldDef = FieldDef::new("onboarded", "onboarded_date", Timestamp);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static DESCRIPTIONS: Relation = Relation {
        name: "descriptions",
        table: "c_rev_cat_description",
        parent_key: "revision_id",
        foreign_key: "revision_id",
        kind: RelationKind::Rows {
            schema: &super::description::SCHEMA,
        },
    };

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "revision",
        table: "c_solution_rev",
        id: &REVISION_ID,
        fields: &[
            &REVISION_ID,
            &SOLUTION_ID,
            &VERSION,
            &USER_ID,
            &AUTHORS,
            &PUBLISHER,
            &ACCESS_TYPE_CODE,
            &VERIFIED_LICENSE,
            &VERIFIED_VULNERABILITY,
            &ORIGIN,
            &ONBOARDED,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[&DESCRIPTIONS],
    };
}

/// Per-catalog revision descriptions; only reachable through a revision.
pub mod description {
    use super::*;

    pub static REVISION_ID: FieldDef = FieldDef::new("revisionId", "revision_id", Id);
    // Unique within the owning revision.
    pub static CATALOG_ID: FieldDef = FieldDef::new("catalogId", "catalog_id", Id);
    pub static DESCRIPTION: FieldDef = FieldDef::new("description", "description", Text);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "description",
        table: "c_rev_cat_description",
        id: &CATALOG_ID,
        fields: &[&REVISION_ID, &CATALOG_ID, &DESCRIPTION, &CREATED, &MODIFIED],
        relations: &[],
    };
}

pub mod user {
    use super::*;

    pub static USER_ID: FieldDef = FieldDef::new("userId", "user_id", Id);
    pub static FIRST_NAME: FieldDef = FieldDef::new("firstName", "first_name", Text);
    pub static MIDDLE_NAME: FieldDef = FieldDef::new("middleName", "middle_name", Text);
    pub static LAST_NAME: FieldDef = FieldDef::new("lastName", "last_name", Text);
    pub static ORG_NAME: FieldDef = FieldDef::new("orgName", "org_name", Text);
    pub static EMAIL: FieldDef = FieldDef::new("email", "email", Text);
    pub static LOGIN_NAME: FieldDef = FieldDef::new("loginName", "login_name", Text);
    pub static ACTIVE: FieldDef = FieldDef::new("active", "active", Bool);
    pub static LOGIN_FAIL_COUNT: FieldDef =
        FieldDef::new("loginFailCount", "login_fail_count", Integer);
    pub static LAST_LOGIN: FieldDef = FieldDef::new("lastLogin", "last_login", Timestamp);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static ROLES: Relation = Relation {
        name: "roleIds",
        table: "c_user_role_map",
        parent_key: "user_id",
        foreign_key: "user_id",
        kind: RelationKind::ValueSet {
            value_column: "role_id",
        },
    };

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "user",
        table: "c_user",
        id: &USER_ID,
        fields: &[
            &USER_ID,
            &FIRST_NAME,
            &MIDDLE_NAME,
            &LAST_NAME,
            &ORG_NAME,
            &EMAIL,
            &LOGIN_NAME,
            &ACTIVE,
            &LOGIN_FAIL_COUNT,
            &LAST_LOGIN,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[&ROLES],
    };
}

pub mod role {
    use super::*;

    pub static ROLE_ID: FieldDef = FieldDef::new("roleId", "role_id", Id);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static ACTIVE: FieldDef = FieldDef::new("active", "active", Bool);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "role",
        table: "c_role",
        id: &ROLE_ID,
        fields: &[&ROLE_ID, &NAME, &ACTIVE, &CREATED, &MODIFIED],
        relations: &[],
    };
}

pub mod catalog {
    use super::*;

    pub static CATALOG_ID: FieldDef = FieldDef::new("catalogId", "catalog_id", Id);
    pub static ACCESS_TYPE_CODE: FieldDef =
        FieldDef::new("accessTypeCode", "access_type_code", Code);
    pub static SELF_PUBLISH: FieldDef = FieldDef::new("selfPublish", "self_publish", Bool);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static PUBLISHER: FieldDef = FieldDef::new("publisher", "publisher", Text);
    pub static DESCRIPTION: FieldDef = FieldDef::new("description", "description", Text);
    pub static ORIGIN: FieldDef = FieldDef::new("origin", "origin", Text);
    pub static URL: FieldDef = FieldDef::new("url", "url", Text);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SOLUTIONS: Relation = Relation {
        name: "solutionIds",
        table: "c_cat_sol_map",
        parent_key: "catalog_id",
        foreign_key: "catalog_id",
        kind: RelationKind::ValueSet {
            value_column: "solution_id",
        },
    };

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "catalog",
        table: "c_catalog",
        id: &CATALOG_ID,
        fields: &[
            &CATALOG_ID,
            &ACCESS_TYPE_CODE,
            &SELF_PUBLISH,
            &NAME,
            &PUBLISHER,
            &DESCRIPTION,
            &ORIGIN,
            &URL,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[&SOLUTIONS],
    };
}

pub mod peer {
    use super::*;

    pub static PEER_ID: FieldDef = FieldDef::new("peerId", "peer_id", Id);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static SUBJECT_NAME: FieldDef = FieldDef::new("subjectName", "subject_name", Text);
    pub static DESCRIPTION: FieldDef = FieldDef::new("description", "description", Text);
    pub static API_URL: FieldDef = FieldDef::new("apiUrl", "api_url", Text);
    pub static WEB_URL: FieldDef = FieldDef::new("webUrl", "web_url", Text);
    pub static IS_SELF: FieldDef = FieldDef::new("isSelf", "is_self", Bool);
    pub static IS_LOCAL: FieldDef = FieldDef::new("isLocal", "is_local", Bool);
    pub static CONTACT1: FieldDef = FieldDef::new("contact1", "contact1", Text);
    pub static STATUS_CODE: FieldDef = FieldDef::new("statusCode", "status_code", Code);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "peer",
        table: "c_peer",
        id: &PEER_ID,
        fields: &[
            &PEER_ID,
            &NAME,
            &SUBJECT_NAME,
            &DESCRIPTION,
            &API_URL,
            &WEB_URL,
            &IS_SELF,
            &IS_LOCAL,
            &CONTACT1,
            &STATUS_CODE,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[],
    };
}

pub mod task {
    use super::*;

    pub static TASK_ID: FieldDef = FieldDef::new("taskId", "task_id", Integer);
    pub static TASK_CODE: FieldDef = FieldDef::new("taskCode", "task_code", Code);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static STATUS_CODE: FieldDef = FieldDef::new("statusCode", "status_code", Code);
    pub static USER_ID: FieldDef = FieldDef::new("userId", "user_id", Id);
    pub static SOLUTION_ID: FieldDef = FieldDef::new("solutionId", "solution_id", Id);
    pub static REVISION_ID: FieldDef = FieldDef::new("revisionId", "revision_id", Id);
    pub static TRACKING_ID: FieldDef = FieldDef::new("trackingId", "tracking_id", Id);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "task",
        table: "c_task",
        id: &TASK_ID,
        fields: &[
            &TASK_ID,
            &TASK_CODE,
            &NAME,
            &STATUS_CODE,
            &USER_ID,
            &SOLUTION_ID,
            &REVISION_ID,
            &TRACKING_ID,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[],
    };
}

pub mod artifact {
    use super::*;

    pub static ARTIFACT_ID: FieldDef = FieldDef::new("artifactId", "artifact_id", Id);
    pub static VERSION: FieldDef = FieldDef::new("version", "version", Text);
    pub static ARTIFACT_TYPE_CODE: FieldDef =
        FieldDef::new("artifactTypeCode", "artifact_type_code", Code);
    pub static NAME: FieldDef = FieldDef::new("name", "name", Text);
    pub static DESCRIPTION: FieldDef = FieldDef::new("description", "description", Text);
    pub static URI: FieldDef = FieldDef::new("uri", "uri", Text);
    pub static SIZE: FieldDef = FieldDef::new("size", "size", Integer);
    pub static USER_ID: FieldDef = FieldDef::new("userId", "user_id", Id);
    pub static METADATA: FieldDef = FieldDef::new("metadata", "metadata", Text);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "artifact",
        table: "c_artifact",
        id: &ARTIFACT_ID,
        fields: &[
            &ARTIFACT_ID,
            &VERSION,
            &ARTIFACT_TYPE_CODE,
            &NAME,
            &DESCRIPTION,
            &URI,
            &SIZE,
            &USER_ID,
            &METADATA,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[],
    };
}

pub mod publish_request {
    use super::*;

    pub static REQUEST_ID: FieldDef = FieldDef::new("requestId", "request_id", Integer);
    pub static SOLUTION_ID: FieldDef = FieldDef::new("solutionId", "solution_id", Id);
    pub static REVISION_ID: FieldDef = FieldDef::new("revisionId", "revision_id", Id);
    pub static CATALOG_ID: FieldDef = FieldDef::new("catalogId", "catalog_id", Id);
    pub static REQUEST_USER_ID: FieldDef =
        FieldDef::new("requestUserId", "request_user_id", Id);
    pub static REVIEW_USER_ID: FieldDef = FieldDef::new("reviewUserId", "review_user_id", Id);
    pub static STATUS_CODE: FieldDef = FieldDef::new("statusCode", "status_code", Code);
    pub static COMMENT: FieldDef = FieldDef::new("comment", "request_comment", Text);
    pub static CREATED: FieldDef = FieldDef::new("created", "created_date", Timestamp);
    pub static MODIFIED: FieldDef = FieldDef::new("modified", "modified_date", Timestamp);

    pub static SCHEMA: EntitySchema = EntitySchema {
        name: "publishRequest",
        table: "c_publish_request",
        id: &REQUEST_ID,
        fields: &[
            &REQUEST_ID,
            &SOLUTION_ID,
            &REVISION_ID,
            &CATALOG_ID,
            &REQUEST_USER_ID,
            &REVIEW_USER_ID,
            &STATUS_CODE,
            &COMMENT,
            &CREATED,
            &MODIFIED,
        ],
        relations: &[],
    };
}
