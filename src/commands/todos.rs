//! Todo Commands
//!
//! Firestore-backed `DocumentStore` over one top-level collection.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use todo_core::{
    Condition, DocumentStore, NewTodo, SnapshotCallback, Subscription, TodoError, TodoId, TodoItem,
    TodoPatch, TodoQuery, TodoResult,
};

use super::{js_message, string_prop, to_js};

#[wasm_bindgen]
extern "C" {
    type Firestore;

    #[wasm_bindgen(js_namespace = firebase, js_name = firestore)]
    fn firestore() -> Firestore;

    #[wasm_bindgen(method)]
    fn collection(this: &Firestore, path: &str) -> CollectionReference;

    type Query;

    #[wasm_bindgen(method, js_name = "where")]
    fn where_eq_raw(this: &Query, field: &str, op: &str, value: &JsValue) -> Query;

    #[wasm_bindgen(method, js_name = orderBy)]
    fn order_by(this: &Query, field: &str, direction: &str) -> Query;

    #[wasm_bindgen(method, js_name = onSnapshot)]
    fn on_snapshot(
        this: &Query,
        next: &Closure<dyn FnMut(QuerySnapshot)>,
        error: &Closure<dyn FnMut(JsValue)>,
    ) -> Function;

    #[wasm_bindgen(method, js_name = get)]
    fn fetch(this: &Query) -> Promise;

    #[wasm_bindgen(extends = Query)]
    type CollectionReference;

    #[wasm_bindgen(method)]
    fn add(this: &CollectionReference, data: &JsValue) -> Promise;

    #[wasm_bindgen(method)]
    fn doc(this: &CollectionReference, id: &str) -> DocumentReference;

    type DocumentReference;

    #[wasm_bindgen(method)]
    fn update(this: &DocumentReference, data: &JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = delete)]
    fn remove(this: &DocumentReference) -> Promise;

    #[wasm_bindgen(method, js_name = get)]
    fn fetch(this: &DocumentReference) -> Promise;

    type QuerySnapshot;

    #[wasm_bindgen(method, getter)]
    fn docs(this: &QuerySnapshot) -> Array;

    type DocumentSnapshot;

    #[wasm_bindgen(method, getter)]
    fn id(this: &DocumentSnapshot) -> String;

    #[wasm_bindgen(method, getter)]
    fn exists(this: &DocumentSnapshot) -> bool;

    #[wasm_bindgen(method)]
    fn data(this: &DocumentSnapshot) -> JsValue;
}

/// Firestore collection of todo documents
#[derive(Debug, Clone)]
pub struct FirestoreTodos {
    collection: String,
}

impl FirestoreTodos {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }

    fn collection_ref(&self) -> CollectionReference {
        firestore().collection(&self.collection)
    }

    fn build_query(&self, query: &TodoQuery) -> Query {
        let mut built: Query = self.collection_ref().into();
        for condition in query.conditions() {
            built = built.where_eq_raw(condition.field(), "==", &condition_value(condition));
        }
        built.order_by(TodoQuery::ORDER_FIELD, TodoQuery::ORDER_DIRECTION)
    }
}

fn condition_value(condition: &Condition) -> JsValue {
    match condition {
        Condition::Completed(v) | Condition::Archived(v) => JsValue::from_bool(*v),
        Condition::AuthorEmail(email) => JsValue::from_str(email),
    }
}

fn store_error(err: JsValue) -> TodoError {
    TodoError::Store(js_message(&err))
}

fn decode_document(doc: &DocumentSnapshot) -> TodoResult<TodoItem> {
    let body: serde_json::Value =
        serde_wasm_bindgen::from_value(doc.data()).map_err(|e| TodoError::Decode(e.to_string()))?;
    Ok(TodoItem::from_document(TodoId::new(doc.id()), body)?)
}

/// Decode every document; one bad document fails the whole snapshot
fn decode_snapshot(snapshot: &QuerySnapshot) -> TodoResult<Vec<TodoItem>> {
    snapshot
        .docs()
        .iter()
        .map(|doc| decode_document(doc.unchecked_ref::<DocumentSnapshot>()))
        .collect()
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreTodos {
    fn subscribe(&self, query: &TodoQuery, on_snapshot: SnapshotCallback) -> TodoResult<Subscription> {
        let deliver: Rc<SnapshotCallback> = Rc::new(on_snapshot);

        let on_next = {
            let deliver = deliver.clone();
            Closure::<dyn FnMut(QuerySnapshot)>::new(move |snapshot: QuerySnapshot| {
                deliver(decode_snapshot(&snapshot));
            })
        };
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
            let err = store_error(err);
            tracing::warn!(error = %err, "live query failed");
            deliver(Err(err));
        });

        let unsubscribe = self.build_query(query).on_snapshot(&on_next, &on_error);
        let label = format!("{}{:?}", self.collection, query.conditions());

        Ok(Subscription::new(label, move || {
            if let Err(err) = unsubscribe.call0(&JsValue::NULL) {
                tracing::warn!(error = %js_message(&err), "snapshot listener release failed");
            }
            drop(on_next);
            drop(on_error);
        }))
    }

    async fn query(&self, query: &TodoQuery) -> TodoResult<Vec<TodoItem>> {
        let snapshot = JsFuture::from(self.build_query(query).fetch())
            .await
            .map_err(store_error)?;
        decode_snapshot(snapshot.unchecked_ref::<QuerySnapshot>())
    }

    async fn create(&self, todo: NewTodo) -> TodoResult<TodoId> {
        let body = to_js(&todo)?;
        let reference = JsFuture::from(self.collection_ref().add(&body))
            .await
            .map_err(store_error)?;
        string_prop(&reference, "id")
            .map(TodoId::new)
            .ok_or_else(|| TodoError::Store("created document has no id".to_string()))
    }

    async fn update(&self, id: &TodoId, patch: TodoPatch) -> TodoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let body = to_js(&patch)?;
        JsFuture::from(self.collection_ref().doc(id.as_str()).update(&body))
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> TodoResult<()> {
        JsFuture::from(self.collection_ref().doc(id.as_str()).remove())
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn get(&self, id: &TodoId) -> TodoResult<Option<TodoItem>> {
        let snapshot = JsFuture::from(self.collection_ref().doc(id.as_str()).fetch())
            .await
            .map_err(store_error)?;
        let doc: &DocumentSnapshot = snapshot.unchecked_ref();
        if !doc.exists() {
            return Ok(None);
        }
        decode_document(doc).map(Some)
    }
}
