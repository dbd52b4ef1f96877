//! C 边界绑定
//!
//! 面向宿主引擎和外部语言绑定的稳定调用契约。所有失败都以布尔值或
//! 空指针报告，绝不跨边界展开 panic；`list_modules` 返回的序列由本侧
//! 分配，调用方必须用配对的 `free_module_list` 归还所有权——边界两侧
//! 可能使用不同的分配器，混用会导致内存损坏。

use crate::config::ManagerConfig;
use crate::manager::ModuleManager;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// 创建管理器，返回独占句柄
///
/// 资源耗尽时返回空指针作为无效句柄，不会终止进程。句柄必须且只能
/// 通过一次 `destroy_module_manager` 释放。
#[no_mangle]
pub extern "C" fn create_module_manager() -> *mut ModuleManager {
    catch_unwind(|| Box::into_raw(Box::new(ModuleManager::new(ManagerConfig::default()))))
        .unwrap_or(std::ptr::null_mut())
}

/// 销毁句柄，释放注册表的全部资源
///
/// 空指针是无操作。调用方保证此时没有其他针对同一句柄的调用在途；
/// 重复销毁或销毁后使用是契约违规，管理器不负责检测。
#[no_mangle]
pub extern "C" fn destroy_module_manager(manager: *mut ModuleManager) {
    if manager.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| unsafe {
        drop(Box::from_raw(manager));
    }));
}

/// 低级注册：不经抓取直接登记名称；重名返回 false
#[no_mangle]
pub extern "C" fn add_module(manager: *mut ModuleManager, name: *const c_char) -> bool {
    if manager.is_null() || name.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let manager = unsafe { &*manager };
        match to_str(name) {
            Some(name) => manager.add(name).is_ok(),
            None => false,
        }
    }))
    .unwrap_or(false)
}

/// 移除模块；名称不存在返回 false
#[no_mangle]
pub extern "C" fn remove_module(manager: *mut ModuleManager, name: *const c_char) -> bool {
    if manager.is_null() || name.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let manager = unsafe { &*manager };
        match to_str(name) {
            Some(name) => manager.remove(name).is_ok(),
            None => false,
        }
    }))
    .unwrap_or(false)
}

/// 按插入顺序返回当前模块名称快照
///
/// 空注册表写出 `*count = 0` 并返回合法的非空序列，绝不以空指针表示
/// 空集。返回值必须用 `free_module_list` 释放，传回同一指针和数量，
/// 每次成功调用恰好释放一次。含内部 NUL 字节的名称（只能经 Rust 层
/// `add` 进入）无法表示为 C 字符串，会从序列中跳过，`*count` 随之减少。
#[no_mangle]
pub extern "C" fn list_modules(manager: *mut ModuleManager, count: *mut c_int) -> *mut *mut c_char {
    if manager.is_null() || count.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(AssertUnwindSafe(|| {
        let manager = unsafe { &*manager };
        let names = manager.list();

        // 含内部 NUL 的名称无法过边界，跳过而非偷换成空串
        let entries: Vec<*mut c_char> = names
            .into_iter()
            .filter_map(|name| CString::new(name).ok().map(CString::into_raw))
            .collect();

        unsafe { *count = entries.len() as c_int };
        Box::into_raw(entries.into_boxed_slice()) as *mut *mut c_char
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// 释放一次 `list_modules` 返回的序列
///
/// 必须传回原样的指针和数量；空指针是无操作。
#[no_mangle]
pub extern "C" fn free_module_list(list: *mut *mut c_char, count: c_int) {
    if list.is_null() || count < 0 {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| unsafe {
        let slice = std::ptr::slice_from_raw_parts_mut(list, count as usize);
        let entries = Box::from_raw(slice);
        for &entry in entries.iter() {
            if !entry.is_null() {
                drop(CString::from_raw(entry));
            }
        }
    }));
}

/// 安装模块：抓取远程制品并登记；重名或抓取失败返回 false
///
/// 抓取阻塞调用线程，但不会阻塞同一句柄上的其他读写。
#[no_mangle]
pub extern "C" fn install_module(
    manager: *mut ModuleManager,
    name: *const c_char,
    repo_url: *const c_char,
) -> bool {
    if manager.is_null() || name.is_null() || repo_url.is_null() {
        return false;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let manager = unsafe { &*manager };
        match (to_str(name), to_str(repo_url)) {
            (Some(name), Some(url)) => manager.install(name, url).is_ok(),
            _ => false,
        }
    }))
    .unwrap_or(false)
}

/// 边界入参转换；非 UTF-8 视为无效参数
fn to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
