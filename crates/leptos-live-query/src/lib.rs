//! Leptos Live Query
//!
//! Keeps one resource handle (a live subscription, a listener, anything
//! released on `Drop`) alive for the current reactive owner. When the
//! reactive key changes, the old handle is dropped before the new one is
//! acquired. The last handle is dropped when the owner is cleaned up.

use leptos::prelude::*;

/// Hold the handle produced by `acquire` for the current value of `key`.
///
/// `key` is tracked; `acquire` is not. Returning `None` from `acquire`
/// leaves the slot empty until the key changes again.
pub fn use_live_query<K, H>(
    key: impl Fn() -> K + 'static,
    acquire: impl Fn(&K) -> Option<H> + 'static,
) where
    K: Clone + PartialEq + 'static,
    H: 'static,
{
    let slot = StoredValue::new_local(None::<H>);

    Effect::new(move |prev: Option<K>| {
        let next = key();
        if prev.as_ref() == Some(&next) {
            return next;
        }
        // release before re-acquiring
        slot.update_value(|held| {
            held.take();
        });
        let handle = untrack(|| acquire(&next));
        if handle.is_none() {
            tracing::debug!("live query not acquired");
        }
        slot.set_value(handle);
        next
    });

    on_cleanup(move || {
        slot.try_update_value(|held| {
            held.take();
        });
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use any_spawner::Executor;

    use super::*;

    struct Handle {
        live: Rc<Cell<i32>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[tokio::test]
    async fn test_one_handle_per_key_released_on_cleanup() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        let live = Rc::new(Cell::new(0));
        let acquired = Rc::new(Cell::new(0));

        tokio::task::LocalSet::new()
            .run_until(async {
                let key = owner.with(|| {
                    let key = RwSignal::new(1);
                    let (live, acquired) = (live.clone(), acquired.clone());
                    use_live_query(
                        move || key.get(),
                        move |_: &i32| {
                            assert_eq!(live.get(), 0, "previous handle still live");
                            acquired.set(acquired.get() + 1);
                            live.set(live.get() + 1);
                            Some(Handle { live: live.clone() })
                        },
                    );
                    key
                });

                Executor::tick().await;
                assert_eq!(live.get(), 1);
                assert_eq!(acquired.get(), 1);

                key.set(2);
                Executor::tick().await;
                assert_eq!(live.get(), 1);
                assert_eq!(acquired.get(), 2);

                // same key: no new handle
                key.set(2);
                Executor::tick().await;
                assert_eq!(live.get(), 1);
                assert_eq!(acquired.get(), 2);

                owner.cleanup();
                assert_eq!(live.get(), 0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_declined_acquire_leaves_slot_empty() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        let live = Rc::new(Cell::new(0));

        tokio::task::LocalSet::new()
            .run_until(async {
                let key = owner.with(|| {
                    let key = RwSignal::new(None::<u8>);
                    let live = live.clone();
                    use_live_query(
                        move || key.get(),
                        move |k: &Option<u8>| {
                            k.map(|_| {
                                live.set(live.get() + 1);
                                Handle { live: live.clone() }
                            })
                        },
                    );
                    key
                });

                Executor::tick().await;
                assert_eq!(live.get(), 0);

                key.set(Some(3));
                Executor::tick().await;
                assert_eq!(live.get(), 1);

                key.set(None);
                Executor::tick().await;
                assert_eq!(live.get(), 0);

                owner.cleanup();
                assert_eq!(live.get(), 0);
            })
            .await;
    }
}
