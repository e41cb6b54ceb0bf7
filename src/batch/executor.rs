//! # 批量执行器
//!
//! 在独立工作线程上严格顺序执行作业计划，通过通道向调用方上报事件。
//!
//! ## 功能
//! - 每条调用同步执行并捕获合并输出（stdout + stderr）
//! - 逐条上报事件：当前项、日志、进度、结束
//! - 协作取消：停止标志只在迭代边界检查，不强杀进行中的调用
//! - 首次失败即中止（fail-fast），已产出的文件保留在磁盘上
//!
//! ## 事件契约
//! - 事件按产生顺序投递，引擎不合并、不重排
//! - `Finished` 每次运行最多发出一次；被取消的运行静默停止，不发 `Finished`
//! - 第 N+1 条调用绝不在第 N 条的结果处理完之前开始
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `batch/builder.rs` 的 JobPlan

use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::batch::builder::{Invocation, JobPlan};

/// 工作线程向调用方上报的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEvent {
    /// 即将开始处理第 index 条调用（0 起）
    CurrentItem {
        index: usize,
        path: std::path::PathBuf,
    },
    /// 一条调用的回显或其捕获的合并输出
    Log(String),
    /// 一条调用成功完成
    Progress,
    /// 运行结束；success=false 时 message 指明失败的文件
    Finished { success: bool, message: String },
}

/// 协作停止句柄
///
/// 调用方唯一允许写入的共享状态。工作线程在每次迭代边界读取，
/// 进行中的 gm 调用会被允许自然结束。
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// 请求停止；在下一个迭代边界生效
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// 是否已请求停止
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 执行状态，仅由工作线程持有
#[derive(Debug)]
struct ExecutionState {
    /// 当前调用下标
    current: usize,
    /// 累计结果
    success: bool,
    /// 最近一次错误消息
    message: String,
}

impl ExecutionState {
    fn new() -> Self {
        ExecutionState {
            current: 0,
            success: true,
            message: String::new(),
        }
    }
}

/// 已启动运行的句柄
pub struct ExecutorHandle {
    stop: StopHandle,
    thread: JoinHandle<()>,
}

impl ExecutorHandle {
    /// 请求协作停止
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// 停止句柄的副本（可跨线程传递）
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// 等待工作线程结束
    pub fn join(self) {
        let _ = self.thread.join();
    }
}

/// 批量执行器
///
/// 一次运行一个实例；无全局状态，同一进程可并存多个实例。
pub struct BatchExecutor {
    plan: JobPlan,
    stop: Arc<AtomicBool>,
    events: Sender<ExecutorEvent>,
}

impl BatchExecutor {
    /// 创建执行器与配套的事件接收端
    pub fn new(plan: JobPlan) -> (Self, Receiver<ExecutorEvent>) {
        let (tx, rx) = mpsc::channel();
        let executor = BatchExecutor {
            plan,
            stop: Arc::new(AtomicBool::new(false)),
            events: tx,
        };
        (executor, rx)
    }

    /// 启动前获取停止句柄
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.stop.clone())
    }

    /// 在新工作线程上开始执行
    pub fn start(self) -> ExecutorHandle {
        let stop = StopHandle(self.stop.clone());
        let thread = thread::spawn(move || self.run());
        ExecutorHandle { stop, thread }
    }

    /// 工作线程主循环
    fn run(self) {
        let total = self.plan.len();
        let mut state = ExecutionState::new();

        for (index, invocation) in self.plan.iter().enumerate() {
            // 迭代边界的协作取消：静默停止，不发 Finished
            if self.stop.load(Ordering::SeqCst) {
                return;
            }

            state.current = index;
            self.emit(ExecutorEvent::CurrentItem {
                index,
                path: invocation.source.clone(),
            });
            self.emit(ExecutorEvent::Log(format!(
                "[{}/{}] Executing: {}\n",
                index + 1,
                total,
                invocation.command_line()
            )));

            match run_invocation(invocation) {
                Ok(output) => {
                    self.emit(ExecutorEvent::Log(output));
                    self.emit(ExecutorEvent::Progress);
                }
                Err(detail) => {
                    self.emit(ExecutorEvent::Log(format!("Error: {}", detail)));
                    state.success = false;
                    let failed = self
                        .plan
                        .get(state.current)
                        .map(|inv| inv.source.display().to_string())
                        .unwrap_or_default();
                    state.message = format!("Failed to process {}", failed);
                    break;
                }
            }
        }

        self.emit(ExecutorEvent::Finished {
            success: state.success,
            message: state.message,
        });
    }

    fn emit(&self, event: ExecutorEvent) {
        // 接收端提前关闭时丢弃事件即可
        let _ = self.events.send(event);
    }
}

/// 同步执行一条调用，返回合并输出
///
/// 非零退出状态与无法启动都按失败处理，错误文本来自捕获的输出。
fn run_invocation(invocation: &Invocation) -> std::result::Result<String, String> {
    let output = Command::new(&invocation.program)
        .args(&invocation.args)
        .output()
        .map_err(|e| format!("failed to launch '{}': {}", invocation.program, e))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if output.status.success() {
        Ok(combined)
    } else {
        Err(combined)
    }
}
