//! Reusable entity storage
//!
//! A pool owns every instance of one entity kind for the whole session.
//! Instances are never freed: `release` parks them (inactive, hidden,
//! physics-disabled) and `acquire` hands the first parked one back out.
//! Every lifecycle change is mirrored to the host as [`HostRequest`]s.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::channel::{EntityId, EntityKind, HostRequest, Outbox};

/// Placement and lifecycle flags shared by every pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Back-reference to the owning pool slot
    pub slot: u32,
    /// Center position in world space
    pub pos: Vec2,
    /// Display size
    pub size: Vec2,
    pub active: bool,
    pub visible: bool,
    pub physics_enabled: bool,
}

impl Body {
    fn parked(slot: u32, size: Vec2) -> Self {
        Self {
            slot,
            pos: Vec2::ZERO,
            size,
            active: false,
            visible: false,
            physics_enabled: false,
        }
    }

    /// Live and participating in collision
    #[inline]
    pub fn is_live(&self) -> bool {
        self.active && self.physics_enabled
    }
}

/// An entity kind that can be stored in a [`Pool`]
pub trait Pooled {
    const KIND: EntityKind;

    /// Construct a fresh, parked instance around a body
    fn from_body(body: Body) -> Self;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;
}

/// Typed index into a [`Pool`]
pub struct Handle<T> {
    slot: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) const fn from_slot(slot: u32) -> Self {
        Self {
            slot,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn slot(self) -> u32 {
        self.slot
    }

    #[inline]
    fn index(self) -> usize {
        self.slot as usize
    }
}

impl<T: Pooled> Handle<T> {
    /// Identity as seen by the host
    #[inline]
    pub fn id(self) -> EntityId {
        EntityId::new(T::KIND, self.slot)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<T: Pooled> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{:?}>({})", T::KIND, self.slot)
    }
}

/// Growable pool of one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    items: Vec<T>,
    /// Size given to newly constructed instances
    size: Vec2,
    /// Expected number of instances; growth past it is reported
    target_size: usize,
}

impl<T: Pooled> Pool<T> {
    pub fn new(size: Vec2, target_size: usize) -> Self {
        Self {
            items: Vec::with_capacity(target_size),
            size,
            target_size,
        }
    }

    /// Activate an instance at `pos`, reusing the first parked slot or
    /// growing the pool when none is free
    pub fn acquire(&mut self, pos: Vec2, out: &mut Outbox) -> Handle<T> {
        let index = match self.items.iter().position(|item| !item.body().active) {
            Some(index) => index,
            None => {
                let slot = self.items.len() as u32;
                self.items.push(T::from_body(Body::parked(slot, self.size)));
                if self.items.len() > self.target_size {
                    log::warn!(
                        "{:?} pool grew past target size {} (now {})",
                        T::KIND,
                        self.target_size,
                        self.items.len()
                    );
                }
                self.items.len() - 1
            }
        };

        let handle = Handle::from_slot(index as u32);
        let body = self.items[index].body_mut();
        body.pos = pos;
        body.active = true;
        body.visible = true;
        body.physics_enabled = true;

        let entity = handle.id();
        out.request(HostRequest::SetPosition { entity, pos });
        out.request(HostRequest::SetActive { entity, active: true });
        out.request(HostRequest::SetVisible { entity, visible: true });
        out.request(HostRequest::SetPhysicsEnabled {
            entity,
            enabled: true,
        });
        handle
    }

    /// Park an instance. Returns false if it was already parked.
    pub fn release(&mut self, handle: Handle<T>, out: &mut Outbox) -> bool {
        let Some(item) = self.items.get_mut(handle.index()) else {
            debug_assert!(false, "release of unknown {:?}", handle);
            log::warn!("Ignoring release of unknown {:?}", handle);
            return false;
        };
        let body = item.body_mut();
        if !body.active {
            return false;
        }
        body.active = false;
        body.visible = false;
        body.physics_enabled = false;

        let entity = handle.id();
        out.request(HostRequest::SetActive {
            entity,
            active: false,
        });
        out.request(HostRequest::SetVisible {
            entity,
            visible: false,
        });
        out.request(HostRequest::SetPhysicsEnabled {
            entity,
            enabled: false,
        });
        true
    }

    /// Move an instance in place without touching its lifecycle flags
    pub fn set_position(&mut self, handle: Handle<T>, pos: Vec2, out: &mut Outbox) {
        let Some(item) = self.items.get_mut(handle.index()) else {
            debug_assert!(false, "reposition of unknown {:?}", handle);
            log::warn!("Ignoring reposition of unknown {:?}", handle);
            return;
        };
        item.body_mut().pos = pos;
        out.request(HostRequest::SetPosition {
            entity: handle.id(),
            pos,
        });
    }

    /// Validate a host-supplied slot
    pub fn handle(&self, slot: u32) -> Option<Handle<T>> {
        ((slot as usize) < self.items.len()).then(|| Handle::from_slot(slot))
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.items.get(handle.index())
    }

    /// All instances with their handles, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (Handle::from_slot(i as u32), item))
    }

    /// Active instances only, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.iter().filter(|(_, item)| item.body().active)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.body().active).count()
    }
}
